use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use super::error::FilterError;

/// A record type the list view can search and sort.
pub trait ListRecord {
    /// Column identifiers that can be sorted on
    type Field: Copy + PartialEq + fmt::Debug + fmt::Display + FromStr<Err = FilterError>;

    const DEFAULT_SORT: Self::Field;

    /// Values matched against the search text. `None` never matches.
    fn search_values(&self) -> Vec<Option<&str>>;

    /// String form of `field`, or `None` when the record has no value for it.
    fn sort_value(&self, field: Self::Field) -> Option<Cow<'_, str>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(FilterError::InvalidSortDirection(s.to_string()))
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows per page. Only the sizes offered by the pagination control are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub const OPTIONS: [usize; 4] = [5, 10, 25, 50];

    pub fn new(size: usize) -> Result<Self, FilterError> {
        if Self::OPTIONS.contains(&size) {
            Ok(Self(size))
        } else {
            Err(FilterError::InvalidPageSize(size))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

/// A sort column plus direction, e.g. parsed from `"email desc"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Per-screen list state. Every setter that changes what the list contains or
/// how it is ordered sends the view back to the first page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewState<F> {
    search_text: String,
    sort_field: F,
    sort_direction: SortDirection,
    page_index: usize,
    page_size: PageSize,
}

impl<F: Copy + PartialEq> ListViewState<F> {
    pub fn new(sort_field: F) -> Self {
        Self {
            search_text: String::new(),
            sort_field,
            sort_direction: SortDirection::Asc,
            page_index: 0,
            page_size: PageSize::default(),
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn sort_field(&self) -> F {
        self.sort_field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page_index = 0;
    }

    pub fn set_sort_field(&mut self, field: F) {
        self.sort_field = field;
        self.page_index = 0;
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort_direction = direction;
        self.page_index = 0;
    }

    pub fn set_sort(&mut self, spec: SortSpec<F>) {
        self.sort_field = spec.field;
        self.sort_direction = spec.direction;
        self.page_index = 0;
    }

    /// Column-header click: the active column flips direction, any other
    /// column becomes active in ascending order.
    pub fn sort_by(&mut self, field: F) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Asc;
        }
        self.page_index = 0;
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.page_index = 0;
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.page_index = index;
    }

    /// Number of pages needed to show `total` rows
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.get())
    }
}

/// Output of the list view: the rows for the current page and the number of
/// rows that matched the search before paging.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRows<'a, R> {
    pub rows: Vec<&'a R>,
    pub total_match_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrganizationField;

    fn on_page_three() -> ListViewState<OrganizationField> {
        let mut state = ListViewState::new(OrganizationField::Name);
        state.set_page_index(3);
        state
    }

    #[test]
    fn narrowing_the_list_returns_to_first_page() {
        let mut state = on_page_three();
        state.set_search_text("acme");
        assert_eq!(state.page_index(), 0);

        let mut state = on_page_three();
        state.set_sort_field(OrganizationField::Email);
        assert_eq!(state.page_index(), 0);

        let mut state = on_page_three();
        state.set_sort_direction(SortDirection::Desc);
        assert_eq!(state.page_index(), 0);

        let mut state = on_page_three();
        state.set_page_size(PageSize::new(25).unwrap());
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn header_click_toggles_active_column() {
        let mut state = ListViewState::new(OrganizationField::Name);
        state.sort_by(OrganizationField::Name);
        assert_eq!(state.sort_direction(), SortDirection::Desc);

        state.sort_by(OrganizationField::Website);
        assert_eq!(state.sort_field(), OrganizationField::Website);
        assert_eq!(state.sort_direction(), SortDirection::Asc);
    }

    #[test]
    fn page_size_is_restricted_to_options() {
        assert_eq!(PageSize::default().get(), 10);
        assert!(PageSize::new(25).is_ok());
        assert_eq!(PageSize::new(7), Err(FilterError::InvalidPageSize(7)));
    }

    #[test]
    fn page_count_rounds_up() {
        let mut state = ListViewState::new(OrganizationField::Name);
        state.set_page_size(PageSize::new(5).unwrap());
        assert_eq!(state.page_count(0), 0);
        assert_eq!(state.page_count(5), 1);
        assert_eq!(state.page_count(11), 3);
    }
}
