//! Font rotation engine.
//!
//! "Random" walks the catalog with a fixed stride of 7 from a moving offset.
//! The walk is deterministic: the same sequence of picks and explicit choices
//! always yields the same fonts.

/// A font the rotation can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontChoice {
    pub name: &'static str,
    /// CSS family stack
    pub family: &'static str,
}

const fn font(name: &'static str, family: &'static str) -> FontChoice {
    FontChoice { name, family }
}

/// Fonts visited by the random pick, in catalog order.
pub const RANDOM_FONTS: [FontChoice; 20] = [
    font("Inter", "Inter, var(--font-geist-sans), system-ui, sans-serif"),
    font(
        "JetBrains Mono",
        "JetBrains Mono, ui-monospace, SFMono-Regular, Menlo, monospace",
    ),
    font("Roboto", "Roboto, Arial, sans-serif"),
    font("Open Sans", "Open Sans, Arial, sans-serif"),
    font("Montserrat", "Montserrat, Arial, sans-serif"),
    font("Poppins", "Poppins, Arial, sans-serif"),
    font(
        "Source Sans 3",
        "Source Sans 3, Source Sans Pro, Arial, sans-serif",
    ),
    font("Merriweather", "Merriweather, Georgia, serif"),
    font("Lora", "Lora, Georgia, serif"),
    font("Playfair Display", "Playfair Display, Georgia, serif"),
    font("Noto Sans", "Noto Sans, Arial, sans-serif"),
    font("Segoe UI", "Segoe UI, Tahoma, Geneva, sans-serif"),
    font(
        "SF Pro",
        "SF Pro Text, SF Pro Display, -apple-system, system-ui, sans-serif",
    ),
    font(
        "iA Writer Mono",
        "iA Writer Mono, JetBrains Mono, ui-monospace, monospace",
    ),
    font("Atkinson Hyperlegible", "Atkinson Hyperlegible, Arial, sans-serif"),
    font("Aptos", "Aptos, Calibri, Segoe UI, sans-serif"),
    font("Space Grotesk", "var(--font-space-grotesk), system-ui, sans-serif"),
    font("Geist", "var(--font-geist-sans), system-ui, sans-serif"),
    font(
        "Instrument Serif",
        "var(--font-instrument-serif), Georgia, serif",
    ),
    font("Bricolage", "var(--font-bricolage), system-ui, sans-serif"),
];

const PICK_STRIDE: usize = 7;
const PASS_OFFSET_STEP: usize = 3;
const EXPLICIT_OFFSET_STEP: usize = 5;

/// Rotation state over a fixed catalog.
#[derive(Debug, Clone)]
pub struct FontRotation<'a> {
    catalog: &'a [FontChoice],
    cursor: usize,
    cycle_offset: usize,
}

impl Default for FontRotation<'static> {
    fn default() -> Self {
        Self {
            catalog: &RANDOM_FONTS,
            cursor: 0,
            cycle_offset: 0,
        }
    }
}

impl<'a> FontRotation<'a> {
    /// Rotation over `catalog`, or `None` when the catalog is empty.
    #[must_use]
    pub const fn new(catalog: &'a [FontChoice]) -> Option<Self> {
        if catalog.is_empty() {
            return None;
        }
        Some(Self {
            catalog,
            cursor: 0,
            cycle_offset: 0,
        })
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn cycle_offset(&self) -> usize {
        self.cycle_offset
    }

    /// Catalog index the next random pick will land on.
    #[must_use]
    pub const fn peek_index(&self) -> usize {
        (self.cycle_offset + self.cursor * PICK_STRIDE) % self.catalog.len()
    }

    /// Take the next random pick and advance.
    ///
    /// Finishing a pass resets the cursor and shifts the offset by 3.
    pub fn next_random(&mut self) -> FontChoice {
        let len = self.catalog.len();
        let pick = self.catalog[self.peek_index()];
        let next = self.cursor + 1;
        if next >= len {
            self.cursor = 0;
            self.cycle_offset = (self.cycle_offset + PASS_OFFSET_STEP) % len;
        } else {
            self.cursor = next;
        }
        tracing::debug!(
            font = pick.name,
            cursor = self.cursor,
            offset = self.cycle_offset,
            "Rotated random font"
        );
        pick
    }

    /// Note an explicit (non-random) font choice: restart the cursor and shift
    /// the offset by 5 so the next random run follows a different pattern.
    pub fn note_explicit_choice(&mut self) {
        self.cursor = 0;
        self.cycle_offset = (self.cycle_offset + EXPLICIT_OFFSET_STEP) % self.catalog.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn index_of(choice: FontChoice) -> usize {
        RANDOM_FONTS
            .iter()
            .position(|candidate| *candidate == choice)
            .unwrap()
    }

    #[test]
    fn first_picks_follow_stride_of_seven() {
        let mut rotation = FontRotation::default();
        let picks: Vec<usize> = (0..4).map(|_| index_of(rotation.next_random())).collect();
        assert_eq!(picks, vec![0, 7, 14, 1]);
    }

    #[test]
    fn full_pass_visits_every_font_once_then_shifts_offset() {
        let mut rotation = FontRotation::default();
        let n = RANDOM_FONTS.len();

        let visited: HashSet<usize> = (0..n).map(|_| index_of(rotation.next_random())).collect();

        assert_eq!(visited.len(), n);
        assert_eq!(rotation.cursor(), 0);
        assert_eq!(rotation.cycle_offset(), 3);
        assert_eq!(rotation.peek_index(), 3);
    }

    #[test]
    fn explicit_choice_changes_next_pick() {
        let mut undisturbed = FontRotation::default();
        let mut disturbed = FontRotation::default();

        undisturbed.next_random();
        disturbed.next_random();

        disturbed.note_explicit_choice();

        let expected = undisturbed.next_random();
        let actual = disturbed.next_random();
        assert_ne!(expected, actual);
        assert_eq!(index_of(actual), 5);
        assert_eq!(disturbed.cycle_offset(), 5);
    }

    #[test]
    fn offsets_wrap_modulo_catalog() {
        let mut rotation = FontRotation::default();
        for _ in 0..4 {
            rotation.note_explicit_choice();
        }
        assert_eq!(rotation.cycle_offset(), 0);
        assert_eq!(rotation.cursor(), 0);
    }

    #[test]
    fn rotation_is_reproducible() {
        let run = || {
            let mut rotation = FontRotation::default();
            let mut names = Vec::new();
            for step in 0..45 {
                if step % 13 == 0 {
                    rotation.note_explicit_choice();
                }
                names.push(rotation.next_random().name);
            }
            names
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn small_catalog_rotation() {
        let catalog = [font("A", "a"), font("B", "b"), font("C", "c")];
        let mut rotation = FontRotation::new(&catalog).unwrap();
        let names: Vec<&str> = (0..6).map(|_| rotation.next_random().name).collect();
        // offset 0: 0, 7%3=1, 14%3=2; then offset 3%3=0 again
        assert_eq!(names, vec!["A", "B", "C", "A", "B", "C"]);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(FontRotation::new(&[]).is_none());
    }
}
