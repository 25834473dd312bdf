//! Which per-team statistics feed which factors.

use fairslot_config::{MatchupRange, PainMultipliers};

/// A per-team statistic computed for every option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    DoubleHeaders,
    TripleHeaders,
    TotalSlots,
    DoubleByes,
    TripleByes,
    Early,
    Late,
}

impl StatKind {
    pub const COUNT: usize = 7;

    pub const ALL: [StatKind; StatKind::COUNT] = [
        StatKind::DoubleHeaders,
        StatKind::TripleHeaders,
        StatKind::TotalSlots,
        StatKind::DoubleByes,
        StatKind::TripleByes,
        StatKind::Early,
        StatKind::Late,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            StatKind::DoubleHeaders => "double_headers",
            StatKind::TripleHeaders => "triple_headers",
            StatKind::TotalSlots => "total_slots",
            StatKind::DoubleByes => "double_byes",
            StatKind::TripleByes => "triple_byes",
            StatKind::Early => "early",
            StatKind::Late => "late",
        }
    }
}

/// Resolved weights plus the set of statistics they require.
///
/// A statistic is required when its own count or deviation weight is active,
/// or when the unhappiness composite is active and gives it a weight. The
/// composite can therefore pull in statistics whose own weights are absent.
///
/// # Example
///
/// ```
/// use fairslot_config::PainMultipliers;
/// use fairslot_scoring::{StatKind, StatPlan};
///
/// let mut pain = PainMultipliers::none();
/// pain.uneven_team_unhappiness = Some(10.0);
/// pain.unhappiness.triple_byes = Some(2.0);
///
/// let plan = StatPlan::new(&pain);
/// assert!(plan.requires(StatKind::TripleByes));
/// assert_eq!(plan.count_weight(StatKind::TripleByes), None);
/// assert!(!plan.requires(StatKind::DoubleHeaders));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StatPlan {
    count: [Option<f64>; StatKind::COUNT],
    deviation: [Option<f64>; StatKind::COUNT],
    early_late_deviation: Option<f64>,
    unhappiness: Option<f64>,
    unhappiness_weights: [Option<f64>; StatKind::COUNT],
    matchup_imbalance: Option<f64>,
    matchup_range: Option<MatchupRange>,
    required: [bool; StatKind::COUNT],
}

impl StatPlan {
    pub fn new(pain: &PainMultipliers) -> Self {
        let active = PainMultipliers::active;
        let mut count = [None; StatKind::COUNT];
        let mut deviation = [None; StatKind::COUNT];

        count[StatKind::DoubleHeaders.index()] = active(pain.double_header_count);
        deviation[StatKind::DoubleHeaders.index()] = active(pain.double_header_deviation);
        count[StatKind::TripleHeaders.index()] = active(pain.triple_header_count);
        deviation[StatKind::TripleHeaders.index()] = active(pain.triple_header_deviation);
        count[StatKind::TotalSlots.index()] = active(pain.total_slot_count);
        deviation[StatKind::TotalSlots.index()] = active(pain.total_slots_deviation);
        count[StatKind::DoubleByes.index()] = active(pain.double_bye_count);
        deviation[StatKind::DoubleByes.index()] = active(pain.double_bye_deviation);
        count[StatKind::TripleByes.index()] = active(pain.triple_bye_count);
        deviation[StatKind::TripleByes.index()] = active(pain.triple_bye_deviation);

        let early_late_deviation = active(pain.early_late_deviation);
        let unhappiness = active(pain.uneven_team_unhappiness);

        let explicit = &pain.unhappiness;
        let or_count = |weight: Option<f64>, kind: StatKind| match weight {
            Some(w) => active(Some(w)),
            None => count[kind.index()],
        };
        let early_late = match explicit.early_late {
            Some(w) => active(Some(w)),
            None => early_late_deviation.map(|w| w / 2.0),
        };

        let mut unhappiness_weights = [None; StatKind::COUNT];
        if unhappiness.is_some() {
            unhappiness_weights[StatKind::DoubleHeaders.index()] =
                or_count(explicit.double_headers, StatKind::DoubleHeaders);
            unhappiness_weights[StatKind::TripleHeaders.index()] =
                or_count(explicit.triple_headers, StatKind::TripleHeaders);
            unhappiness_weights[StatKind::TotalSlots.index()] =
                or_count(explicit.total_slots, StatKind::TotalSlots);
            unhappiness_weights[StatKind::DoubleByes.index()] =
                or_count(explicit.double_byes, StatKind::DoubleByes);
            unhappiness_weights[StatKind::TripleByes.index()] =
                or_count(explicit.triple_byes, StatKind::TripleByes);
            unhappiness_weights[StatKind::Early.index()] = early_late;
            unhappiness_weights[StatKind::Late.index()] = early_late;
        }

        let mut required = [false; StatKind::COUNT];
        for kind in StatKind::ALL {
            let i = kind.index();
            let own = match kind {
                StatKind::Early | StatKind::Late => early_late_deviation.is_some(),
                _ => count[i].is_some() || deviation[i].is_some(),
            };
            required[i] = own || unhappiness_weights[i].is_some();
        }

        Self {
            count,
            deviation,
            early_late_deviation,
            unhappiness,
            unhappiness_weights,
            matchup_imbalance: active(pain.matchup_imbalance),
            matchup_range: pain.matchup_range,
            required,
        }
    }

    /// Whether the stats engine must compute `kind`.
    pub fn requires(&self, kind: StatKind) -> bool {
        self.required[kind.index()]
    }

    pub fn count_weight(&self, kind: StatKind) -> Option<f64> {
        self.count[kind.index()]
    }

    pub fn deviation_weight(&self, kind: StatKind) -> Option<f64> {
        self.deviation[kind.index()]
    }

    pub fn early_late_deviation(&self) -> Option<f64> {
        self.early_late_deviation
    }

    pub fn unhappiness(&self) -> Option<f64> {
        self.unhappiness
    }

    /// Weight of `kind` inside the unhappiness composite.
    pub fn unhappiness_weight(&self, kind: StatKind) -> Option<f64> {
        self.unhappiness_weights[kind.index()]
    }

    pub fn matchup_imbalance(&self) -> Option<f64> {
        self.matchup_imbalance
    }

    /// Configured meeting range, if any.
    pub fn matchup_range(&self) -> Option<MatchupRange> {
        self.matchup_range
    }
}
