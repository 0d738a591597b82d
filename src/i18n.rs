//! Static string table for the two supported languages

use serde::{Deserialize, Serialize};

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn toggle(&self) -> Self {
        match self {
            Self::En => Self::Fr,
            Self::Fr => Self::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Fr => "FR",
        }
    }
}

/// Every user-facing string the wizard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Title,
    StepPersonalInfo,
    StepProgram,
    StepAccommodation,
    StepSummary,
    Country,
    FirstName,
    LastName,
    BirthDate,
    BirthDateHint,
    BirthPlace,
    Phone,
    Email,
    ParentName,
    ParentContact,
    FieldOfStudy,
    AllFields,
    Search,
    SearchPlaceholder,
    University,
    Tuition,
    City,
    Level,
    AccommodationType,
    Roommates,
    Person,
    People,
    UpTo,
    PerMonth,
    BasePrice,
    PricePerPerson,
    SplitBetween,
    ContinueAccommodation,
    SummaryTitle,
    StudentName,
    AcademicYear,
    TotalCost,
    Services,
    ServicesTotal,
    NoServices,
    StartNew,
    Download,
    Back,
    InvalidPhone,
    InvalidEmail,
    TooShort,
    InvalidName,
    TooYoung,
    InvalidDate,
    ManualEntry,
    ManualEntryHint,
    Loading,
    LookupFailed,
    LookupTimeout,
    LookupEmpty,
    NoMatches,
    Retry,
    Modify,
    Page,
    Next,
    Previous,
    RegistrationForm,
    Reference,
    Date,
    Exported,
    Copied,
    ErrorTitle,
    Press,
    Or,
    ToDismiss,
}

/// Look up `key` in the table for `lang`
pub fn t(lang: Language, key: MessageKey) -> &'static str {
    match lang {
        Language::En => en(key),
        Language::Fr => fr(key),
    }
}

fn en(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        Title => "Study Abroad Registration",
        StepPersonalInfo => "Personal Information",
        StepProgram => "Program Selection",
        StepAccommodation => "Accommodation",
        StepSummary => "Summary",
        Country => "Country",
        FirstName => "First Name",
        LastName => "Last Name",
        BirthDate => "Date of Birth",
        BirthDateHint => "Free typing: 31122000 -> 31/12/2000",
        BirthPlace => "Place of Birth",
        Phone => "Phone Number",
        Email => "Email",
        ParentName => "Parent's Name",
        ParentContact => "Parent's Contact",
        FieldOfStudy => "Field of Study",
        AllFields => "All Fields",
        Search => "Search",
        SearchPlaceholder => "Search by university, city, or field...",
        University => "University",
        Tuition => "Tuition",
        City => "City",
        Level => "Level",
        AccommodationType => "Type",
        Roommates => "Number of Roommates",
        Person => "Person",
        People => "People",
        UpTo => "Up to",
        PerMonth => "per month",
        BasePrice => "Base price",
        PricePerPerson => "per person",
        SplitBetween => "Split between",
        ContinueAccommodation => "Continue with Selected Accommodation",
        SummaryTitle => "Registration Summary",
        StudentName => "Student Name",
        AcademicYear => "Academic Year",
        TotalCost => "Total Cost (Academic Year)",
        Services => "Additional Services",
        ServicesTotal => "Total Services",
        NoServices => "No additional services selected",
        StartNew => "Start New Registration",
        Download => "Download Registration Form",
        Back => "Back",
        InvalidPhone => "Please enter a valid phone number",
        InvalidEmail => "Please enter a valid email address",
        TooShort => "This field must be at least 2 characters long",
        InvalidName => {
            "Please enter a valid name (letters, spaces, hyphens and apostrophes only)"
        }
        TooYoung => "You must be at least 15 years old",
        InvalidDate => "Invalid date",
        ManualEntry => "Enter manually",
        ManualEntryHint => "Can't find what you are looking for? Add it manually.",
        Loading => "Loading...",
        LookupFailed => "Unable to load the directory",
        LookupTimeout => "The directory did not answer in time",
        LookupEmpty => "Nothing found for this country, enter it manually",
        NoMatches => "No match for your search",
        Retry => "Retry",
        Modify => "Modify",
        Page => "Page",
        Next => "Next",
        Previous => "Previous",
        RegistrationForm => "Registration Form",
        Reference => "Reference",
        Date => "Date",
        Exported => "Registration form saved to",
        Copied => "Summary copied to clipboard",
        ErrorTitle => "Error",
        Press => "Press",
        Or => "or",
        ToDismiss => "to dismiss",
    }
}

fn fr(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        Title => "Inscription aux Études à l'Étranger",
        StepPersonalInfo => "Informations Personnelles",
        StepProgram => "Choix du Programme",
        StepAccommodation => "Hébergement",
        StepSummary => "Résumé",
        Country => "Pays",
        FirstName => "Prénom",
        LastName => "Nom",
        BirthDate => "Date de Naissance",
        BirthDateHint => "Saisie libre : 31122000 -> 31/12/2000",
        BirthPlace => "Lieu de Naissance",
        Phone => "Numéro de Téléphone",
        Email => "Email",
        ParentName => "Nom du Parent",
        ParentContact => "Contact du Parent",
        FieldOfStudy => "Domaine d'Études",
        AllFields => "Tous les Domaines",
        Search => "Rechercher",
        SearchPlaceholder => "Rechercher par université, ville ou domaine...",
        University => "Université",
        Tuition => "Frais de Scolarité",
        City => "Ville",
        Level => "Niveau",
        AccommodationType => "Type",
        Roommates => "Nombre de Colocataires",
        Person => "Personne",
        People => "Personnes",
        UpTo => "Jusqu'à",
        PerMonth => "par mois",
        BasePrice => "Prix de base",
        PricePerPerson => "par personne",
        SplitBetween => "Divisé entre",
        ContinueAccommodation => "Continuer avec l'Hébergement Sélectionné",
        SummaryTitle => "Résumé de l'Inscription",
        StudentName => "Nom de l'Étudiant",
        AcademicYear => "Année Académique",
        TotalCost => "Coût Total (Année Académique)",
        Services => "Services Supplémentaires",
        ServicesTotal => "Total Services",
        NoServices => "Aucun service supplémentaire sélectionné",
        StartNew => "Nouvelle Inscription",
        Download => "Télécharger le Formulaire d'Inscription",
        Back => "Retour",
        InvalidPhone => "Veuillez entrer un numéro de téléphone valide",
        InvalidEmail => "Veuillez entrer une adresse email valide",
        TooShort => "Ce champ doit contenir au moins 2 caractères",
        InvalidName => {
            "Veuillez entrer un nom valide (lettres, espaces, tirets et apostrophes uniquement)"
        }
        TooYoung => "Vous devez avoir au moins 15 ans",
        InvalidDate => "Date invalide ou future",
        ManualEntry => "Saisir manuellement",
        ManualEntryHint => "Vous ne trouvez pas ce que vous cherchez ? Ajoutez-le manuellement.",
        Loading => "Chargement...",
        LookupFailed => "Impossible de charger l'annuaire",
        LookupTimeout => "L'annuaire n'a pas répondu à temps",
        LookupEmpty => "Aucun résultat pour ce pays, saisissez-le manuellement",
        NoMatches => "Aucun résultat pour votre recherche",
        Retry => "Réessayer",
        Modify => "Modifier",
        Page => "Page",
        Next => "Suivant",
        Previous => "Précédent",
        RegistrationForm => "Formulaire d'Inscription",
        Reference => "Référence",
        Date => "Date",
        Exported => "Formulaire d'inscription enregistré dans",
        Copied => "Résumé copié dans le presse-papiers",
        ErrorTitle => "Erreur",
        Press => "Appuyez sur",
        Or => "ou",
        ToDismiss => "pour fermer",
    }
}
