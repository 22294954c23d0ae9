//! Velocity to dynamics marking.

/// Named dynamics levels and the velocity each one sits at, quietest first.
const BANDS: [(u8, &str); 8] = [
    (16, "pianississimo (𝆏𝆏𝆏)"),
    (33, "pianissimo (𝆏𝆏)"),
    (49, "piano (𝆏)"),
    (64, "mezzo-piano (𝆐𝆏)"),
    (80, "mezzo-forte (𝆐𝆑)"),
    (96, "forte (𝆑)"),
    (112, "fortissimo (𝆑𝆑)"),
    (127, "fortississimo (𝆑𝆑𝆑)"),
];

/// Describe a note velocity as a dynamics marking.
///
/// Velocities that hit a band exactly get the band's name. Anything else is
/// described relative to its neighbours, with the raw value in parentheses:
/// "between piano (𝆏) and mezzo-piano (𝆐𝆏) (56)".
pub fn volume_label(velocity: u8) -> String {
    if let Some((_, name)) = BANDS.iter().find(|(v, _)| *v == velocity) {
        return (*name).to_string();
    }

    let (softest, loudest) = (BANDS[0], BANDS[BANDS.len() - 1]);
    if velocity < softest.0 {
        return format!("below {} ({})", softest.1, velocity);
    }

    match BANDS.windows(2).find(|w| w[0].0 < velocity && velocity < w[1].0) {
        Some(w) => format!("between {} and {} ({})", w[0].1, w[1].1, velocity),
        None => format!("above {} ({})", loudest.1, velocity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_bands() {
        assert_eq!(volume_label(16), "pianississimo (𝆏𝆏𝆏)");
        assert_eq!(volume_label(33), "pianissimo (𝆏𝆏)");
        assert_eq!(volume_label(49), "piano (𝆏)");
        assert_eq!(volume_label(64), "mezzo-piano (𝆐𝆏)");
        assert_eq!(volume_label(80), "mezzo-forte (𝆐𝆑)");
        assert_eq!(volume_label(96), "forte (𝆑)");
        assert_eq!(volume_label(112), "fortissimo (𝆑𝆑)");
        assert_eq!(volume_label(127), "fortississimo (𝆑𝆑𝆑)");
    }

    #[test]
    fn in_between() {
        assert_eq!(volume_label(24), "between pianississimo (𝆏𝆏𝆏) and pianissimo (𝆏𝆏) (24)");
        assert_eq!(volume_label(40), "between pianissimo (𝆏𝆏) and piano (𝆏) (40)");
        assert_eq!(volume_label(56), "between piano (𝆏) and mezzo-piano (𝆐𝆏) (56)");
        assert_eq!(volume_label(72), "between mezzo-piano (𝆐𝆏) and mezzo-forte (𝆐𝆑) (72)");
        assert_eq!(volume_label(88), "between mezzo-forte (𝆐𝆑) and forte (𝆑) (88)");
        assert_eq!(volume_label(104), "between forte (𝆑) and fortissimo (𝆑𝆑) (104)");
        assert_eq!(volume_label(120), "between fortissimo (𝆑𝆑) and fortississimo (𝆑𝆑𝆑) (120)");
        // neighbours of a band stay on the right side of it
        assert_eq!(volume_label(17), "between pianississimo (𝆏𝆏𝆏) and pianissimo (𝆏𝆏) (17)");
        assert_eq!(volume_label(126), "between fortissimo (𝆑𝆑) and fortississimo (𝆑𝆑𝆑) (126)");
    }

    #[test]
    fn out_of_range() {
        assert_eq!(volume_label(0), "below pianississimo (𝆏𝆏𝆏) (0)");
        assert_eq!(volume_label(8), "below pianississimo (𝆏𝆏𝆏) (8)");
        assert_eq!(volume_label(15), "below pianississimo (𝆏𝆏𝆏) (15)");
        assert_eq!(volume_label(128), "above fortississimo (𝆑𝆑𝆑) (128)");
        assert_eq!(volume_label(255), "above fortississimo (𝆑𝆑𝆑) (255)");
    }
}
