//! Bill date formatting.
//!
//! Dates arrive as `YYYY-MM-DD` strings and are rendered through a template
//! such as `{year}年{month}月{day}日`. Only the shape is checked here; a
//! month of 13 formats without complaint. Use [`DateParts::to_naive_date`]
//! when calendar validity matters.

use chrono::NaiveDate;

use crate::config::DEFAULT_DATE_TEMPLATE;
use crate::error::{SplitError, SplitResult};

/// The numeric components of a `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    /// Year component.
    pub year: u32,
    /// Month component, leading zeros stripped.
    pub month: u32,
    /// Day component, leading zeros stripped.
    pub day: u32,
}

impl DateParts {
    /// Returns the calendar date, or `None` if the parts are not a real date.
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        let year = i32::try_from(self.year).ok()?;
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    /// Renders the parts through `template`.
    pub fn render(self, template: &str) -> String {
        template
            .replace("{year}", &self.year.to_string())
            .replace("{month}", &self.month.to_string())
            .replace("{day}", &self.day.to_string())
    }
}

fn invalid_date(input: &str, message: impl Into<String>) -> SplitError {
    SplitError::InvalidDate {
        input: input.to_string(),
        message: message.into(),
    }
}

/// Splits a `YYYY-MM-DD` string into its numeric parts.
///
/// # Errors
///
/// Returns `InvalidDate` if there are not exactly three `-` separated
/// components, or if any component is empty or not all digits.
pub fn parse_date_parts(input: &str) -> SplitResult<DateParts> {
    let components: Vec<&str> = input.trim().split('-').collect();
    if components.len() != 3 {
        return Err(invalid_date(
            input,
            format!(
                "expected three '-' separated components, found {}",
                components.len()
            ),
        ));
    }

    let mut values = [0u32; 3];
    for (value, (label, component)) in values
        .iter_mut()
        .zip(["year", "month", "day"].into_iter().zip(components))
    {
        if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid_date(
                input,
                format!("{} '{}' is not numeric", label, component),
            ));
        }
        *value = component
            .parse()
            .map_err(|_| invalid_date(input, format!("{} '{}' is out of range", label, component)))?;
    }

    let [year, month, day] = values;
    Ok(DateParts { year, month, day })
}

/// Formats a `YYYY-MM-DD` string with the default long-form template.
///
/// # Examples
///
/// ```
/// use bill_splitter::calculation::format_date;
///
/// assert_eq!(format_date("2024-03-09").unwrap(), "2024年3月9日");
/// assert!(format_date("2024/03/09").is_err());
/// ```
pub fn format_date(input: &str) -> SplitResult<String> {
    format_date_with_template(input, DEFAULT_DATE_TEMPLATE)
}

/// Formats a `YYYY-MM-DD` string through `template`.
pub fn format_date_with_template(input: &str, template: &str) -> SplitResult<String> {
    Ok(parse_date_parts(input)?.render(template))
}
