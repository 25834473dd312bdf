//! Weight presets.

use fairslot_config::PainMultipliers;

/// Every factor enabled, including the composite and matchup balance.
pub fn every_factor() -> PainMultipliers {
    PainMultipliers {
        double_header_count: Some(0.1),
        double_header_deviation: Some(0.5),
        triple_header_count: Some(0.3),
        triple_header_deviation: Some(0.7),
        total_slot_count: Some(0.1),
        total_slots_deviation: Some(0.2),
        double_bye_count: Some(1.5),
        double_bye_deviation: Some(15.0),
        triple_bye_count: Some(2.0),
        triple_bye_deviation: Some(4.0),
        early_late_deviation: Some(1.0),
        uneven_team_unhappiness: Some(50.0),
        matchup_imbalance: Some(5.0),
        ..PainMultipliers::default()
    }
}

/// Only the spread of total slots across teams.
pub fn totals_only() -> PainMultipliers {
    PainMultipliers {
        total_slots_deviation: Some(1.0),
        ..PainMultipliers::none()
    }
}
