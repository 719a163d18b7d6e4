use serde::{Deserialize, Serialize};

/// Qualitative tier derived from a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    Critico,
    Precario,
    Mediano,
    Avancado,
}

/// Inclusive upper bound of each tier, ascending. The last bound is open.
const MATURITY_TABLE: [(f64, MaturityLevel); 4] = [
    (30.0, MaturityLevel::Critico),
    (50.0, MaturityLevel::Precario),
    (70.0, MaturityLevel::Mediano),
    (f64::INFINITY, MaturityLevel::Avancado),
];

impl MaturityLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Critico, Self::Precario, Self::Mediano, Self::Avancado]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critico => "Crítico",
            Self::Precario => "Precário",
            Self::Mediano => "Mediano",
            Self::Avancado => "Avançado",
        }
    }

    pub const fn range(self) -> &'static str {
        match self {
            Self::Critico => "0-30%",
            Self::Precario => "31-50%",
            Self::Mediano => "51-70%",
            Self::Avancado => "71-100%",
        }
    }

    pub const fn chart_color(self) -> &'static str {
        match self {
            Self::Critico => "#ef4444",
            Self::Precario => "#f97316",
            Self::Mediano => "#eab308",
            Self::Avancado => "#22c55e",
        }
    }
}

/// Tier for `score` out of `max_score`. Nothing to score counts as Crítico.
pub fn maturity_for(score: u32, max_score: u32) -> MaturityLevel {
    maturity_for_sum(u64::from(score), u64::from(max_score))
}

/// Same as [`maturity_for`] for totals summed across several submissions.
pub(crate) fn maturity_for_sum(score: u64, max_score: u64) -> MaturityLevel {
    if max_score == 0 {
        return MaturityLevel::Critico;
    }
    maturity_for_percentage(percentage_of(score, max_score))
}

/// Tier for an already computed percentage; boundary values stay in the lower tier.
pub fn maturity_for_percentage(percentage: f64) -> MaturityLevel {
    if percentage.is_nan() {
        return MaturityLevel::Critico;
    }
    MATURITY_TABLE
        .iter()
        .find(|(upper_bound, _)| percentage <= *upper_bound)
        .map(|(_, level)| *level)
        .unwrap_or(MaturityLevel::Avancado)
}

pub(crate) fn percentage_of(score: u64, max_score: u64) -> f64 {
    if max_score == 0 {
        0.0
    } else {
        100.0 * score as f64 / max_score as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominator_is_critical() {
        assert_eq!(maturity_for(0, 0), MaturityLevel::Critico);
        assert_eq!(maturity_for(12, 0), MaturityLevel::Critico);
    }

    #[test]
    fn boundaries_belong_to_the_lower_tier() {
        assert_eq!(maturity_for(0, 100).label(), "Crítico");
        assert_eq!(maturity_for(30, 100).label(), "Crítico");
        assert_eq!(maturity_for(31, 100).label(), "Precário");
        assert_eq!(maturity_for(50, 100).label(), "Precário");
        assert_eq!(maturity_for(51, 100).label(), "Mediano");
        assert_eq!(maturity_for(70, 100).label(), "Mediano");
        assert_eq!(maturity_for(71, 100).label(), "Avançado");
        assert_eq!(maturity_for(100, 100).label(), "Avançado");
    }

    #[test]
    fn fractional_percentages_just_above_a_bound_move_up() {
        assert_eq!(maturity_for_percentage(30.01), MaturityLevel::Precario);
        assert_eq!(maturity_for_percentage(70.5), MaturityLevel::Avancado);
        assert_eq!(maturity_for(7, 10), MaturityLevel::Mediano);
        assert_eq!(maturity_for(11, 15), MaturityLevel::Avancado);
    }

    #[test]
    fn scores_above_the_maximum_stay_advanced() {
        assert_eq!(maturity_for(150, 100), MaturityLevel::Avancado);
        assert_eq!(maturity_for_percentage(f64::NAN), MaturityLevel::Critico);
    }

    #[test]
    fn tiers_are_ordered_and_carry_display_metadata() {
        let ordered = MaturityLevel::ordered();
        assert!(ordered.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(MaturityLevel::Mediano.range(), "51-70%");
        assert_eq!(MaturityLevel::Avancado.chart_color(), "#22c55e");
    }
}
