//! Cosmetic play-by-play lines emitted while the round clock runs.

use rand::seq::SliceRandom;
use rand::Rng;

use clutch_core::types::{MapLayout, RosterMember};

const TEMPLATES: [&str; 8] = [
    "{player} takes early control of {site}",
    "{player} lurks towards {site}",
    "{player} throws utility into {site}",
    "{player} holds an off-angle near {site}",
    "{player} calls for a regroup before hitting {site}",
    "{player} spots movement on {site}",
    "{player} rotates to cover {site}",
    "{player} trades a rifle for the spike carrier near {site}",
];

/// A templated line naming a random player from either roster.
pub fn round_flavor<R: Rng + ?Sized>(
    home: &[RosterMember],
    away: &[RosterMember],
    map: Option<&MapLayout>,
    rng: &mut R,
) -> String {
    let player = home
        .iter()
        .chain(away.iter())
        .collect::<Vec<_>>()
        .choose(rng)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| "Someone".to_string());

    let sites = map.map_or(2, |m| m.bomb_sites.max(1));
    let site = format!("{} site", (b'A' + rng.gen_range(0..sites)) as char);

    let template = TEMPLATES.choose(rng).copied().unwrap_or(TEMPLATES[0]);
    template.replace("{player}", &player).replace("{site}", &site)
}
