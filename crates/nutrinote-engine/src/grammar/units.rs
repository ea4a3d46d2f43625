use std::str::FromStr;

/// Grams-equivalent weight assumed for one piece when the food has no
/// serving size.
pub const DEFAULT_PIECE_GRAMS: f64 = 100.0;

/// Nutrient data is expressed per this many grams-equivalent.
pub const NUTRIENT_BASIS: f64 = 100.0;

/// A measure accepted after a linked entry's amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Gram,
    Kilogram,
    Millilitre,
    Litre,
    Ounce,
    Pound,
    Cup,
    Tablespoon,
    Teaspoon,
    Piece,
}

impl Unit {
    /// Grams-equivalent per one unit. `None` for pieces, whose weight
    /// depends on the food's serving size.
    pub fn grams_equivalent(self) -> Option<f64> {
        match self {
            Unit::Gram | Unit::Millilitre => Some(1.0),
            Unit::Kilogram | Unit::Litre => Some(1000.0),
            Unit::Ounce => Some(28.35),
            Unit::Pound => Some(453.6),
            Unit::Cup => Some(240.0),
            Unit::Tablespoon => Some(15.0),
            Unit::Teaspoon => Some(5.0),
            Unit::Piece => None,
        }
    }
}

impl FromStr for Unit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "g" => Ok(Unit::Gram),
            "kg" => Ok(Unit::Kilogram),
            "ml" => Ok(Unit::Millilitre),
            "l" => Ok(Unit::Litre),
            "oz" => Ok(Unit::Ounce),
            "lb" => Ok(Unit::Pound),
            "cup" | "cups" => Ok(Unit::Cup),
            "tbsp" => Ok(Unit::Tablespoon),
            "tsp" => Ok(Unit::Teaspoon),
            "pc" | "pcs" => Ok(Unit::Piece),
            _ => Err(()),
        }
    }
}

/// Converts `amount` of `unit` into a factor over the 100-unit nutrient basis.
///
/// Piece units use `serving_size` when it is positive, otherwise
/// [`DEFAULT_PIECE_GRAMS`]. Unknown units behave like grams.
pub fn unit_multiplier(amount: f64, unit: &str, serving_size: Option<f64>) -> f64 {
    let per_unit = match unit.parse::<Unit>() {
        Ok(Unit::Piece) => serving_size
            .filter(|size| *size > 0.0)
            .unwrap_or(DEFAULT_PIECE_GRAMS),
        Ok(other) => other.grams_equivalent().unwrap_or(1.0),
        Err(()) => 1.0,
    };
    amount * per_unit / NUTRIENT_BASIS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(50.0, "g", 0.5)]
    #[case(250.0, "ml", 2.5)]
    #[case(100.0, "kg", 1000.0)]
    #[case(2.0, "l", 20.0)]
    #[case(1.0, "oz", 0.2835)]
    #[case(1.0, "lb", 4.536)]
    #[case(1.0, "cup", 2.4)]
    #[case(2.0, "cups", 4.8)]
    #[case(1.0, "tbsp", 0.15)]
    #[case(3.0, "tsp", 0.15)]
    #[case(2.0, "pcs", 2.0)]
    #[case(1.0, "pc", 1.0)]
    #[case(40.0, "G", 0.4)]
    #[case(1.0, "KG", 10.0)]
    fn multiplier_per_unit(#[case] amount: f64, #[case] unit: &str, #[case] expected: f64) {
        let actual = unit_multiplier(amount, unit, None);
        assert!(
            (actual - expected).abs() < 1e-9,
            "{amount}{unit}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn grams_divide_by_hundred() {
        for amount in [0.0, 1.0, 12.5, 100.0, 731.0] {
            assert_eq!(unit_multiplier(amount, "g", None), amount / 100.0);
        }
    }

    #[test]
    fn pieces_use_positive_serving_size() {
        assert_eq!(unit_multiplier(2.0, "pcs", Some(50.0)), 1.0);
        assert_eq!(unit_multiplier(2.0, "pcs", Some(0.0)), 2.0);
        assert_eq!(unit_multiplier(2.0, "pcs", Some(-10.0)), 2.0);
    }

    #[test]
    fn serving_size_ignored_for_weight_units() {
        assert_eq!(unit_multiplier(200.0, "g", Some(50.0)), 2.0);
    }

    #[test]
    fn unknown_unit_behaves_like_grams() {
        assert_eq!(unit_multiplier(30.0, "handful", None), 0.3);
        assert!("handful".parse::<Unit>().is_err());
    }
}
