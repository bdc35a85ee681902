//! Register button evasion
//!
//! While the form is invalid the Register button hops between three slots
//! whenever the pointer enters it. From an edge it always returns to the
//! middle; from the middle it flees to the edge opposite the approach.
//!
//! ```text
//!            left          right
//! Start   -> Middle        Middle
//! Middle  -> End           Start
//! End     -> Middle        Middle
//! ```

/// Horizontal placement of the Register button within its row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ButtonSlot {
    Start,
    #[default]
    Middle,
    End,
}

/// Which half of the button the pointer came in on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSide {
    Left,
    Right,
}

impl PointerSide {
    /// Classify a pointer position normalized to the button width
    /// (0.0 = left edge, 1.0 = right edge). The midpoint counts as left;
    /// NaN falls through to right.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio <= 0.5 {
            Self::Left
        } else {
            Self::Right
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Indexed by `[slot][side]`
const TRANSITIONS: [[ButtonSlot; 2]; 3] = [
    // Start
    [ButtonSlot::Middle, ButtonSlot::Middle],
    // Middle
    [ButtonSlot::End, ButtonSlot::Start],
    // End
    [ButtonSlot::Middle, ButtonSlot::Middle],
];

impl ButtonSlot {
    fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Middle => 1,
            Self::End => 2,
        }
    }

    /// Next slot after the pointer approaches from `side`
    pub fn after(self, side: PointerSide) -> Self {
        TRANSITIONS[self.index()][side.index()]
    }

    /// Column offset of a button of `button_width` inside a row of `row_width`
    pub fn column_offset(self, row_width: u16, button_width: u16) -> u16 {
        let free = row_width.saturating_sub(button_width);
        match self {
            Self::Start => 0,
            Self::Middle => free / 2,
            Self::End => free,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Decide where the button goes after a hover.
///
/// A valid form never moves the button.
pub fn on_hover_attempt(
    slot: ButtonSlot,
    overall_valid: bool,
    pointer_offset_ratio: f64,
) -> ButtonSlot {
    if overall_valid {
        return slot;
    }
    slot.after(PointerSide::from_ratio(pointer_offset_ratio))
}

/// Pointer ratio for a terminal column inside a button spanning `[x, x + width)`.
///
/// Uses the cell center so that an even-width button splits evenly.
pub fn pointer_ratio(column: u16, x: u16, width: u16) -> f64 {
    if width == 0 {
        return 0.5;
    }
    let offset = column.saturating_sub(x).min(width - 1);
    (f64::from(offset) + 0.5) / f64::from(width)
}
