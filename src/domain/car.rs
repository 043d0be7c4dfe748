use crate::domain::non_empty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub name: String,
    pub price_per_day: f64,
    pub year: i64,
    pub color: String,
    pub steering_type: String,
    pub number_of_seats: i64,
}

/// Car creation payload, validated by `RentalService::create_car`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateCar {
    pub name: Option<String>,
    pub price_per_day: Option<f64>,
    pub year: Option<i64>,
    pub color: Option<String>,
    pub steering_type: Option<String>,
    pub number_of_seats: Option<i64>,
}

/// Raw `/rental-cars` query string. Values arrive as text and are parsed by
/// [`CarQuery::into_filter`].
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CarQuery {
    pub year: Option<String>,
    pub color: Option<String>,
    pub steering_type: Option<String>,
    pub number_of_seats: Option<String>,
}

/// Criterion on an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntCriterion {
    Equals(i64),
    /// The query value had no leading integer; no car can match it.
    Unmatchable,
}

impl IntCriterion {
    fn matches(self, value: i64) -> bool {
        match self {
            IntCriterion::Equals(expected) => value == expected,
            IntCriterion::Unmatchable => false,
        }
    }
}

/// Exact-match criteria; `None` fields do not constrain the result.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CarFilter {
    pub year: Option<IntCriterion>,
    pub color: Option<String>,
    pub steering_type: Option<String>,
    pub number_of_seats: Option<IntCriterion>,
}

impl CarFilter {
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.color.is_none()
            && self.steering_type.is_none()
            && self.number_of_seats.is_none()
    }

    pub fn matches(&self, car: &Car) -> bool {
        self.year.is_none_or(|year| year.matches(car.year))
            && self.color.as_deref().is_none_or(|color| car.color == color)
            && self
                .steering_type
                .as_deref()
                .is_none_or(|steering| car.steering_type == steering)
            && self
                .number_of_seats
                .is_none_or(|seats| seats.matches(car.number_of_seats))
    }
}

impl CarQuery {
    /// Never fails: an integer field that does not start with a number turns
    /// into [`IntCriterion::Unmatchable`].
    pub fn into_filter(self) -> CarFilter {
        CarFilter {
            year: integer_criterion(self.year),
            color: non_empty(self.color),
            steering_type: non_empty(self.steering_type),
            number_of_seats: integer_criterion(self.number_of_seats),
        }
    }
}

fn integer_criterion(value: Option<String>) -> Option<IntCriterion> {
    non_empty(value).map(|raw| match leading_integer(&raw) {
        Some(n) => IntCriterion::Equals(n),
        None => IntCriterion::Unmatchable,
    })
}

/// Reads an optional sign and the leading decimal digits, ignoring leading
/// whitespace and anything after the digits: `"2022abc"` is 2022.
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
