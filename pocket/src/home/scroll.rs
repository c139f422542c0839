//! Scroll offset to layout animation mapping.
//!
//! Everything the home screen animates is a function of one number, the
//! vertical offset of the posting list. [`animate`] turns that offset into the
//! values the renderer needs; [`ScrollState`] eases the offset between the two
//! snap positions of the list.

use serde::Deserialize;

/// How an interpolation behaves outside its input range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extrapolate {
    /// Saturate at the first/last output value
    Clamp,
    /// Keep following the slope of the outermost segment
    Extend,
}

/// Piecewise linear interpolation of `value` over `input` breakpoints.
///
/// `input` must be ascending and the same length as `output` (at least two points).
pub fn interpolate(value: f32, input: &[f32], output: &[f32], extrapolate: Extrapolate) -> f32 {
    debug_assert!(input.len() >= 2 && input.len() == output.len());

    let last = input.len() - 1;
    if extrapolate == Extrapolate::Clamp {
        if value <= input[0] {
            return output[0];
        }
        if value >= input[last] {
            return output[last];
        }
    }

    // Segment containing value, or the outermost one when extending
    let segment = input
        .windows(2)
        .position(|w| value <= w[1])
        .unwrap_or(last - 1);

    let (x0, x1) = (input[segment], input[segment + 1]);
    let (y0, y1) = (output[segment], output[segment + 1]);
    if x1 == x0 {
        return y1;
    }
    y0 + (value - x0) * (y1 - y0) / (x1 - x0)
}

/// Layout constants of the home screen, in abstract layout units
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollGeometry {
    /// Offset of the transaction-focused snap position
    pub bottom_bound: f32,
    /// Distance between the top of the screen and the list once collapsed
    pub margin_top: f32,
    /// Header height that stays visible when collapsed
    pub header_visible: f32,
    /// How much earlier than the bottom bound the action row is fully faded
    pub action_fade_lead: f32,
    /// Overscroll range above the top of the list
    pub overscroll: f32,
    pub gradient_diff: f32,
    pub small_gradient_diff: f32,
    /// Top gradient resting position when the user has no ledgers
    pub empty_gradient_position: f32,
    pub hidden_info_hidden_offset: f32,
    pub hidden_info_visible_offset: f32,
}

impl Default for ScrollGeometry {
    fn default() -> Self {
        Self {
            bottom_bound: 310.0,
            margin_top: 120.0,
            header_visible: 175.0,
            action_fade_lead: 150.0,
            overscroll: 300.0,
            gradient_diff: 15.0,
            small_gradient_diff: 4.0,
            empty_gradient_position: 220.0,
            hidden_info_hidden_offset: 110.0,
            hidden_info_visible_offset: 45.0,
        }
    }
}

impl ScrollGeometry {
    /// Vertical travel of the header between the two snap positions (negative: upwards)
    pub fn header_travel(&self) -> f32 {
        -self.bottom_bound + self.header_visible
    }
}

/// Every animated layout value of the home screen for one scroll offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeAnimation {
    pub header_translate_y: f32,
    pub actions_opacity: f32,
    pub content_margin_top: f32,
    pub list_header_top: f32,
    pub shadow_gradient_top: f32,
    pub top_gradient_top: f32,
    pub hidden_info_opacity: f32,
    pub hidden_info_top: f32,
    /// The list rests on the transaction-focused snap position
    pub fixed_at_top: bool,
}

/// Map a scroll offset to the home screen layout.
///
/// `has_ledgers` moves the resting position of the gradients: without any
/// ledger the header is shorter.
pub fn animate(offset: f32, geometry: &ScrollGeometry, has_ledgers: bool) -> HomeAnimation {
    use Extrapolate::*;

    let b = geometry.bottom_bound;
    let m = geometry.margin_top;
    let over = geometry.overscroll;
    let gradient_default = if has_ledgers {
        b
    } else {
        geometry.empty_gradient_position
    };
    let three_point = [-over, 0.0, b];

    // The action row fade is specified unclamped; bound it before it reaches a style
    let actions_opacity =
        interpolate(offset, &[0.0, b - geometry.action_fade_lead], &[1.0, 0.0], Extend)
            .clamp(0.0, 1.0);

    HomeAnimation {
        header_translate_y: interpolate(offset, &[0.0, b], &[0.0, geometry.header_travel()], Clamp),
        actions_opacity,
        content_margin_top: interpolate(offset, &[0.0, b], &[0.0, m], Clamp),
        list_header_top: interpolate(offset, &three_point, &[b + over, b, m], Clamp),
        shadow_gradient_top: interpolate(
            offset,
            &three_point,
            &[
                b - geometry.gradient_diff + over,
                gradient_default - geometry.small_gradient_diff,
                m - geometry.small_gradient_diff,
            ],
            Clamp,
        ),
        top_gradient_top: interpolate(offset, &three_point, &[b + over, gradient_default, m], Clamp),
        hidden_info_opacity: interpolate(offset, &[b / 2.0, b], &[0.0, 1.0], Clamp),
        hidden_info_top: interpolate(
            offset,
            &[b / 2.0, b],
            &[
                m + geometry.hidden_info_hidden_offset,
                m - geometry.hidden_info_visible_offset,
            ],
            Clamp,
        ),
        fixed_at_top: offset == b,
    }
}

/// Snap position the list is resting at or heading to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapPoint {
    /// Header fully expanded
    #[default]
    Top,
    /// Header collapsed, postings fill the screen
    Transactions,
}

/// Fraction of the remaining distance covered per animation step
const EASING: f32 = 0.35;
/// Below this distance the offset jumps onto its target
const SETTLE_DISTANCE: f32 = 0.5;

/// Current and target scroll offset of the home list
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    offset: f32,
    target: SnapPoint,
}

impl ScrollState {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn target(&self) -> SnapPoint {
        self.target
    }

    pub fn snap_to(&mut self, target: SnapPoint) {
        self.target = target;
    }

    pub fn is_settled(&self, geometry: &ScrollGeometry) -> bool {
        self.offset == Self::target_offset(self.target, geometry)
    }

    /// Move one animation frame toward the target. Returns whether the offset changed.
    pub fn step(&mut self, geometry: &ScrollGeometry) -> bool {
        let target = Self::target_offset(self.target, geometry);
        let distance = target - self.offset;
        if distance == 0.0 {
            return false;
        }
        if distance.abs() <= SETTLE_DISTANCE {
            self.offset = target;
        } else {
            self.offset += distance * EASING;
        }
        true
    }

    fn target_offset(target: SnapPoint, geometry: &ScrollGeometry) -> f32 {
        match target {
            SnapPoint::Top => 0.0,
            SnapPoint::Transactions => geometry.bottom_bound,
        }
    }
}
