use crate::Player;

pub struct PlayerValueCalculator;

impl PlayerValueCalculator {
    pub fn calculate(player: &Player) -> u32 {
        let base_value = determine_base_value(player);
        let potential_factor = determine_potential_factor(player);
        let fusion_factor = determine_fusion_factor(player);
        let form_factor = determine_form_factor(player);

        let value = base_value * potential_factor * fusion_factor * form_factor;

        value.max(10_000.0) as u32
    }
}

/// Cubic growth on rating: 300 → ~1.2M, 600 → ~9.7M, 900 → ~32.8M.
fn determine_base_value(player: &Player) -> f64 {
    let normalized = player.rating as f64 / 1000.0;

    45_000_000.0 * normalized * normalized * normalized
}

/// Headroom between rating and potential is priced in.
fn determine_potential_factor(player: &Player) -> f64 {
    let headroom = player.potential.saturating_sub(player.rating) as f64;

    1.0 + (headroom / 1000.0).min(0.5)
}

fn determine_fusion_factor(player: &Player) -> f64 {
    let [primary, _] = player.pentagon.fusion_skills(player.position);

    0.85 + (primary.value as f64 / 200.0) * 0.3
}

fn determine_form_factor(player: &Player) -> f64 {
    match player.statistics.phase() {
        Some(phase) if phase > 8.0 => 1.15,
        Some(phase) if phase < 5.0 => 0.9,
        _ => 1.0,
    }
}
