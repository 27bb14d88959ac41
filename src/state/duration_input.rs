//! Duration input fields with sanitizing text entry

/// The three duration components a consumer can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Hour,
    Minute,
    Second,
}

impl Field {
    /// Largest value accepted for this component; anything above is
    /// clamped down to it. Minutes and seconds accept "60" to match the
    /// input fields this controller backs.
    pub fn max_value(&self) -> u32 {
        match self {
            Field::Hour => 24,
            Field::Minute | Field::Second => 60,
        }
    }
}

/// The hour/minute/second entry fields, stored as digits-only strings.
///
/// Text goes through [`DurationInput::set`] which silently sanitizes
/// rather than rejecting: non-digits are stripped, and values that are
/// too long or too large collapse to the field maximum. An empty field
/// counts as zero.
#[derive(Debug, Clone, Default)]
pub struct DurationInput {
    hour: String,
    minute: String,
    second: String,
}

impl DurationInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize `raw` and store it as the given component.
    pub fn set(&mut self, field: Field, raw: &str) {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        let cleaned = if digits.len() > 2
            || digits.parse::<u32>().map_or(false, |v| v > field.max_value())
        {
            field.max_value().to_string()
        } else {
            digits
        };
        *self.component_mut(field) = cleaned;
    }

    /// Stored text for the given component
    pub fn component(&self, field: Field) -> &str {
        match field {
            Field::Hour => &self.hour,
            Field::Minute => &self.minute,
            Field::Second => &self.second,
        }
    }

    /// Replace empty components with "00", mirroring what the entry
    /// fields show once a countdown starts.
    pub fn normalize(&mut self) {
        for field in [Field::Hour, Field::Minute, Field::Second] {
            let component = self.component_mut(field);
            if component.is_empty() {
                component.push_str("00");
            }
        }
    }

    /// Total duration in seconds; empty components count as zero.
    pub fn total_seconds(&self) -> u64 {
        let hours: u64 = self.hour.parse().unwrap_or(0);
        let minutes: u64 = self.minute.parse().unwrap_or(0);
        let seconds: u64 = self.second.parse().unwrap_or(0);
        hours * 3600 + minutes * 60 + seconds
    }

    fn component_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Hour => &mut self.hour,
            Field::Minute => &mut self.minute,
            Field::Second => &mut self.second,
        }
    }
}
