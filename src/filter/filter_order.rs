use std::cmp::Ordering;
use std::str::FromStr;

use super::collate::locale_compare;
use super::error::FilterError;
use super::types::{ListRecord, SortDirection, SortSpec};

pub struct FilterOrder;

impl FilterOrder {
    /// Parse `"<field>"` or `"<field> asc|desc"`.
    pub fn parse<F>(spec: &str) -> Result<SortSpec<F>, FilterError>
    where
        F: FromStr<Err = FilterError>,
    {
        let mut it = spec.split_whitespace();
        let field = it
            .next()
            .ok_or_else(|| FilterError::InvalidSortSpec("empty sort spec".to_string()))?
            .parse::<F>()?;
        let direction = match it.next() {
            Some(dir) => dir.parse::<SortDirection>()?,
            None => SortDirection::Asc,
        };
        if let Some(extra) = it.next() {
            return Err(FilterError::InvalidSortSpec(format!("unexpected token '{}' in '{}'", extra, spec)));
        }
        Ok(SortSpec { field, direction })
    }

    /// Compare two sort keys. A missing key sorts after a present one in both
    /// directions; direction only flips the order of two present keys.
    pub fn compare(a: Option<&str>, b: Option<&str>, direction: SortDirection) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                let ordering = locale_compare(a, b);
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    }

    /// Stable in-place sort of `rows` by `field`.
    pub fn sort<R: ListRecord>(rows: &mut [&R], field: R::Field, direction: SortDirection) {
        rows.sort_by(|a, b| {
            let a_value = a.sort_value(field);
            let b_value = b.sort_value(field);
            Self::compare(present(a_value.as_deref()), present(b_value.as_deref()), direction)
        });
    }
}

// Empty strings count as missing.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrganizationField, PersonField};

    #[test]
    fn parses_field_with_optional_direction() {
        let spec: SortSpec<OrganizationField> = FilterOrder::parse("email").unwrap();
        assert_eq!(spec.field, OrganizationField::Email);
        assert_eq!(spec.direction, SortDirection::Asc);

        let spec: SortSpec<PersonField> = FilterOrder::parse("last_name DESC").unwrap();
        assert_eq!(spec.field, PersonField::LastName);
        assert_eq!(spec.direction, SortDirection::Desc);
    }

    #[test]
    fn rejects_bad_specs() {
        assert!(FilterOrder::parse::<OrganizationField>("").is_err());
        assert!(FilterOrder::parse::<OrganizationField>("name sideways").is_err());
        assert!(FilterOrder::parse::<OrganizationField>("name asc extra").is_err());
        assert_eq!(
            FilterOrder::parse::<OrganizationField>("phone"),
            Err(FilterError::InvalidSortField("phone".to_string()))
        );
    }

    #[test]
    fn missing_sorts_last_regardless_of_direction() {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(FilterOrder::compare(None, Some("a"), direction), Ordering::Greater);
            assert_eq!(FilterOrder::compare(Some("a"), None, direction), Ordering::Less);
            assert_eq!(FilterOrder::compare(None, None, direction), Ordering::Equal);
        }
        assert_eq!(FilterOrder::compare(Some("a"), Some("b"), SortDirection::Desc), Ordering::Greater);
    }
}
