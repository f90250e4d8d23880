use super::component::{
    ComponentDraft, ComponentStatus, ComponentType, LayoutComponent, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};

/// Field state behind the add and edit forms.
///
/// The form works on its own copy of the values, so dropping it discards any
/// change. Numeric inputs arrive as raw text and fall back to a per-field
/// default when they do not parse or parse to zero.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentForm {
    draft: ComponentDraft,
    color_overridden: bool,
}

impl ComponentForm {
    /// Blank add form: a growbed with its default color and a 100x100 footprint.
    pub fn for_new() -> Self {
        Self {
            draft: ComponentDraft::new("", ComponentType::Growbed),
            color_overridden: false,
        }
    }

    pub fn from_component(component: &LayoutComponent) -> Self {
        Self {
            draft: component.to_draft(),
            color_overridden: false,
        }
    }

    pub fn draft(&self) -> &ComponentDraft {
        &self.draft
    }

    pub fn into_draft(self) -> ComponentDraft {
        self.draft
    }

    pub fn reset(&mut self) {
        *self = Self::for_new();
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.draft.name.trim().is_empty()
    }

    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.to_string();
    }

    /// Switches the type and, unless a color was picked in this form, moves
    /// the color to the new type's default.
    pub fn set_component_type(&mut self, component_type: ComponentType) {
        self.draft.component_type = component_type;
        if !self.color_overridden {
            self.draft.color = component_type.default_color().to_string();
        }
    }

    pub fn set_color(&mut self, color: &str) {
        self.draft.color = color.to_string();
        self.color_overridden = true;
    }

    pub fn set_status(&mut self, status: ComponentStatus) {
        self.draft.status = status;
    }

    pub fn set_x(&mut self, input: &str) {
        self.draft.x_position = parse_or(input, 0.0);
    }

    pub fn set_y(&mut self, input: &str) {
        self.draft.y_position = parse_or(input, 0.0);
    }

    pub fn set_width(&mut self, input: &str) {
        self.draft.width = parse_or(input, DEFAULT_WIDTH);
    }

    pub fn set_height(&mut self, input: &str) {
        self.draft.height = parse_or(input, DEFAULT_HEIGHT);
    }

    pub fn set_layer_order(&mut self, input: &str) {
        self.draft.layer_order = leading_number(input, false)
            .and_then(|text| text.parse::<i32>().ok())
            .unwrap_or(0);
    }
}

impl Default for ComponentForm {
    fn default() -> Self {
        Self::for_new()
    }
}

/// Reads the numeric prefix of `input` ("12.5cm" is 12.5); zero, empty and
/// unparsable input fall back.
fn parse_or(input: &str, fallback: f64) -> f64 {
    match leading_number(input, true).and_then(|text| text.parse::<f64>().ok()) {
        Some(value) if value.is_finite() && value != 0.0 => value,
        _ => fallback,
    }
}

/// Longest prefix of `input` (after leading whitespace) that reads as a
/// signed number. Fractions and exponents are only taken when `fraction`.
fn leading_number(input: &str, fraction: bool) -> Option<&str> {
    let text = input.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if fraction {
        if bytes.get(end) == Some(&b'.') {
            let frac_end = digits_from(end + 1);
            if has_digits || frac_end > end + 1 {
                has_digits = true;
                end = frac_end;
            }
        }
        if has_digits && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_end = digits_from(exp);
            if exp_end > exp {
                end = exp_end;
            }
        }
    }

    has_digits.then(|| &text[..end])
}
