//! Where the first installment is placed.

use plan_core::types::{Date, DateError};
use std::fmt;
use std::str::FromStr;

/// Rule for deriving the first installment date before the 12-month
/// window cap is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FirstPaymentAnchor {
    /// 1st of the month after the as-of date. If the as-of date is itself
    /// the 1st, that day is used.
    #[default]
    NextMonth,
    /// 1st of the course start month, even when it is already in the past.
    CourseStart,
}

impl FirstPaymentAnchor {
    /// Returns the configuration name of this anchor.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            FirstPaymentAnchor::NextMonth => "next-month",
            FirstPaymentAnchor::CourseStart => "course-start",
        }
    }

    /// Resolves the anchored first payment date.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_models::policy::FirstPaymentAnchor;
    /// use plan_core::types::Date;
    ///
    /// let as_of = Date::from_ymd(2024, 3, 18).unwrap();
    /// let start = Date::from_ymd(2024, 1, 10).unwrap();
    ///
    /// assert_eq!(
    ///     FirstPaymentAnchor::NextMonth.resolve(as_of, start).unwrap(),
    ///     Date::from_ymd(2024, 4, 1).unwrap()
    /// );
    /// assert_eq!(
    ///     FirstPaymentAnchor::CourseStart.resolve(as_of, start).unwrap(),
    ///     Date::from_ymd(2024, 1, 1).unwrap()
    /// );
    /// ```
    pub fn resolve(&self, as_of: Date, course_start: Date) -> Result<Date, DateError> {
        match self {
            FirstPaymentAnchor::NextMonth => {
                if as_of.day() == 1 {
                    Ok(as_of)
                } else {
                    as_of.first_of_next_month()
                }
            }
            FirstPaymentAnchor::CourseStart => Ok(course_start.first_of_month()),
        }
    }
}

impl fmt::Display for FirstPaymentAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FirstPaymentAnchor {
    type Err = String;

    /// Parses an anchor name (case-insensitive, `-`/`_`/space insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "nextmonth" | "today" => Ok(FirstPaymentAnchor::NextMonth),
            "coursestart" | "start" => Ok(FirstPaymentAnchor::CourseStart),
            _ => Err(format!("Unknown first payment anchor: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_next_month_mid_month() {
        let first = FirstPaymentAnchor::NextMonth
            .resolve(d(2024, 12, 15), d(2025, 1, 1))
            .unwrap();
        assert_eq!(first, d(2025, 1, 1));
    }

    #[test]
    fn test_next_month_on_the_first() {
        let first = FirstPaymentAnchor::NextMonth
            .resolve(d(2024, 5, 1), d(2024, 9, 1))
            .unwrap();
        assert_eq!(first, d(2024, 5, 1));
    }

    #[test]
    fn test_course_start_ignores_as_of() {
        let first = FirstPaymentAnchor::CourseStart
            .resolve(d(2030, 1, 1), d(2024, 2, 20))
            .unwrap();
        assert_eq!(first, d(2024, 2, 1));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "next-month".parse::<FirstPaymentAnchor>().unwrap(),
            FirstPaymentAnchor::NextMonth
        );
        assert_eq!(
            "Course_Start".parse::<FirstPaymentAnchor>().unwrap(),
            FirstPaymentAnchor::CourseStart
        );
        assert!("end".parse::<FirstPaymentAnchor>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for anchor in [FirstPaymentAnchor::NextMonth, FirstPaymentAnchor::CourseStart] {
            assert_eq!(anchor.to_string().parse::<FirstPaymentAnchor>().unwrap(), anchor);
        }
    }
}
