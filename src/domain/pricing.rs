//! Accommodation cost sharing

/// Months billed for one academic year
pub const ACADEMIC_YEAR_MONTHS: u32 = 12;

/// Monthly price per occupant, rounded half away from zero.
///
/// A roommate count of zero is treated as one.
pub fn price_per_person(base_price: u32, roommate_count: u8) -> u32 {
    let divisor = u64::from(roommate_count.max(1));
    let base = u64::from(base_price);
    // integer form of round(base / divisor) for non-negative operands
    ((2 * base + divisor) / (2 * divisor)) as u32
}

/// Tuition plus a year of accommodation plus any extra services
pub fn academic_year_total(tuition_fee: u32, monthly_per_person: u32, services: u32) -> u64 {
    u64::from(tuition_fee)
        + u64::from(monthly_per_person) * u64::from(ACADEMIC_YEAR_MONTHS)
        + u64::from(services)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_apartment_split_four_ways() {
        assert_eq!(price_per_person(800, 4), 200);
    }

    #[test]
    fn test_single_occupant_pays_base_price() {
        for base in [0, 1, 450, 600, 900, 12_345] {
            assert_eq!(price_per_person(base, 1), base);
        }
    }

    #[test]
    fn test_zero_roommates_treated_as_one() {
        assert_eq!(price_per_person(600, 0), 600);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 450 / 4 = 112.5
        assert_eq!(price_per_person(450, 4), 113);
        // 800 / 3 = 266.67
        assert_eq!(price_per_person(800, 3), 267);
        // 100 / 3 = 33.33
        assert_eq!(price_per_person(100, 3), 33);
    }

    #[test]
    fn test_price_is_positive_and_bounded_by_base() {
        for base in [450u32, 600, 800, 900] {
            for roommates in 1..=4u8 {
                let price = price_per_person(base, roommates);
                assert!(price > 0, "{base}/{roommates}");
                assert!(price <= base, "{base}/{roommates}");
            }
        }
    }

    #[test]
    fn test_academic_year_total() {
        assert_eq!(academic_year_total(9500, 200, 150), 9500 + 2400 + 150);
        assert_eq!(academic_year_total(0, 0, 0), 0);
    }
}
