//! Client-side list filtering, totals and age computation.

use chrono::{DateTime, Datelike, Local, Months, NaiveDate, TimeDelta};

use super::records::{Analysis, Operation, Patient, Payment, Visit};

/// Value of the status select meaning "no status filter"
pub const ANY_STATUS: &str = "all";

/// Creation/visit date window of the list selects
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateWindow {
    #[default]
    All,
    Today,
    /// Last 7 days
    Week,
    /// Since the same day last month
    Month,
}

impl DateWindow {
    pub const ALL: [DateWindow; 4] = [Self::All, Self::Today, Self::Week, Self::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Toutes les périodes",
            Self::Today => "Aujourd'hui",
            Self::Week => "Cette semaine",
            Self::Month => "Ce mois",
        }
    }

    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == value)
            .unwrap_or_default()
    }

    /// Whether `timestamp` (ISO string) falls within the window ending at `now`.
    /// Unparseable or missing timestamps only pass [`DateWindow::All`].
    pub fn contains(self, timestamp: Option<&str>, now: DateTime<Local>) -> bool {
        if self == Self::All {
            return true;
        }
        let Some(at) = timestamp.and_then(parse_timestamp) else {
            return false;
        };
        match self {
            Self::All => true,
            Self::Today => at.date_naive() == now.date_naive(),
            Self::Week => at >= now - TimeDelta::days(7),
            Self::Month => now
                .checked_sub_months(Months::new(1))
                .is_some_and(|since| at >= since),
        }
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.with_timezone(&Local));
    }
    // Bare dates are taken as local midnight
    NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(Local)
        .earliest()
}

/// A record the list pages can filter
pub trait Filterable {
    /// `needle` is already lowercased and non-empty; `raw` is the input as typed.
    fn matches_text(&self, needle: &str, raw: &str) -> bool;
    fn status(&self) -> Option<&str>;
    /// Date the window filter applies to
    fn timestamp(&self) -> Option<&str> {
        None
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

fn ref_name(person: &Option<super::records::PersonRef>) -> Option<&str> {
    person.as_ref().map(|p| p.fullname.as_str())
}

impl Filterable for Patient {
    fn matches_text(&self, needle: &str, raw: &str) -> bool {
        contains_ci(Some(&self.fullname), needle)
            || contains_ci(self.patient_number.as_deref(), needle)
            // Phone numbers are matched as typed
            || self.phone.as_deref().is_some_and(|p| p.contains(raw))
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl Filterable for Visit {
    fn matches_text(&self, needle: &str, _raw: &str) -> bool {
        contains_ci(ref_name(&self.patient), needle)
            || contains_ci(
                self.patient.as_ref().and_then(|p| p.patient_number.as_deref()),
                needle,
            )
            || contains_ci(self.visit_number.as_deref(), needle)
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn timestamp(&self) -> Option<&str> {
        self.visit_date.as_deref()
    }
}

impl Filterable for Analysis {
    fn matches_text(&self, needle: &str, _raw: &str) -> bool {
        contains_ci(ref_name(&self.patient), needle)
            || contains_ci(self.analysis_number.as_deref(), needle)
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn timestamp(&self) -> Option<&str> {
        self.prescription_date.as_deref()
    }
}

impl Filterable for Operation {
    fn matches_text(&self, needle: &str, _raw: &str) -> bool {
        contains_ci(ref_name(&self.patient), needle)
            || contains_ci(self.operation_number.as_deref(), needle)
            || contains_ci(self.operation_type.as_deref(), needle)
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn timestamp(&self) -> Option<&str> {
        self.scheduled_date.as_deref()
    }
}

impl Filterable for Payment {
    fn matches_text(&self, needle: &str, _raw: &str) -> bool {
        contains_ci(ref_name(&self.patient), needle)
            || contains_ci(self.payment_number.as_deref(), needle)
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn timestamp(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

/// Search box, status select and date window of a list page
#[derive(Clone, Debug, PartialEq)]
pub struct ListFilter {
    pub search: String,
    pub status: String,
    pub window: DateWindow,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: ANY_STATUS.to_string(),
            window: DateWindow::All,
        }
    }
}

impl ListFilter {
    pub fn matches<T: Filterable>(&self, item: &T, now: DateTime<Local>) -> bool {
        let raw = self.search.trim();
        if !raw.is_empty() && !item.matches_text(&raw.to_lowercase(), raw) {
            return false;
        }
        let status = self.status.as_str();
        if status != ANY_STATUS && !status.is_empty() && item.status() != Some(status) {
            return false;
        }
        self.window.contains(item.timestamp(), now)
    }

    pub fn apply<T: Filterable + Clone>(&self, items: &[T], now: DateTime<Local>) -> Vec<T> {
        items
            .iter()
            .filter(|item| self.matches(*item, now))
            .cloned()
            .collect()
    }
}

/// Summary cards of the payments page
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaymentTotals {
    pub total: f64,
    pub paid: f64,
    pub remaining: f64,
    pub count: usize,
}

impl PaymentTotals {
    pub fn of(payments: &[Payment]) -> Self {
        payments.iter().fold(Self::default(), |acc, p| Self {
            total: acc.total + p.final_amount.unwrap_or(0.0),
            paid: acc.paid + p.paid_amount.unwrap_or(0.0),
            remaining: acc.remaining + p.remaining_amount.unwrap_or(0.0),
            count: acc.count + 1,
        })
    }
}

/// Full years between `birth` and `today`
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Age from an ISO date of birth, as of today
pub fn age_from_iso(date_of_birth: &str) -> Option<i32> {
    let birth = NaiveDate::parse_from_str(date_of_birth.get(..10)?, "%Y-%m-%d").ok()?;
    Some(age_on(birth, Local::now().date_naive()))
}

/// Display form of an ISO timestamp: `dd/mm/yyyy`
pub fn display_date(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|at| at.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinic::records::PersonRef;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 15, 14, 0, 0).unwrap()
    }

    fn local_iso(y: i32, m: u32, d: u32, h: u32) -> String {
        Local
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
            .to_rfc3339()
    }

    fn patient(name: &str, number: &str, phone: &str, status: &str) -> Patient {
        Patient {
            fullname: name.into(),
            patient_number: Some(number.into()),
            phone: Some(phone.into()),
            status: Some(status.into()),
            ..Patient::default()
        }
    }

    fn payment(number: &str, status: &str, created_at: String, amounts: (f64, f64, f64)) -> Payment {
        Payment {
            payment_number: Some(number.into()),
            patient: Some(PersonRef {
                fullname: "Amina Said".into(),
                ..PersonRef::default()
            }),
            status: Some(status.into()),
            created_at: Some(created_at),
            final_amount: Some(amounts.0),
            paid_amount: Some(amounts.1),
            remaining_amount: Some(amounts.2),
            ..Payment::default()
        }
    }

    #[test]
    fn patient_search_covers_name_number_and_phone() {
        let patients = vec![
            patient("Said Ali", "PAT-0001", "3331122", "actif"),
            patient("Amina Mze", "PAT-0002", "3440000", "inactif"),
        ];
        let filter = |search: &str| ListFilter {
            search: search.into(),
            ..ListFilter::default()
        };
        assert_eq!(filter("said").apply(&patients, now()).len(), 1);
        assert_eq!(filter("pat-0002").apply(&patients, now())[0].fullname, "Amina Mze");
        assert_eq!(filter("3331").apply(&patients, now())[0].fullname, "Said Ali");
        assert_eq!(filter("  ").apply(&patients, now()).len(), 2);
    }

    #[test]
    fn status_filter_all_means_no_filter() {
        let patients = vec![
            patient("Said Ali", "PAT-0001", "333", "actif"),
            patient("Amina Mze", "PAT-0002", "344", "inactif"),
        ];
        let mut filter = ListFilter::default();
        assert_eq!(filter.apply(&patients, now()).len(), 2);
        filter.status = "inactif".into();
        assert_eq!(filter.apply(&patients, now())[0].fullname, "Amina Mze");
    }

    #[test]
    fn date_windows() {
        let today = Some(local_iso(2026, 3, 15, 8));
        let five_days = Some(local_iso(2026, 3, 10, 15));
        let twenty_days = Some(local_iso(2026, 2, 23, 15));
        let two_months = Some(local_iso(2026, 1, 10, 15));

        assert!(DateWindow::Today.contains(today.as_deref(), now()));
        assert!(!DateWindow::Today.contains(five_days.as_deref(), now()));
        assert!(DateWindow::Week.contains(five_days.as_deref(), now()));
        assert!(!DateWindow::Week.contains(twenty_days.as_deref(), now()));
        assert!(DateWindow::Month.contains(twenty_days.as_deref(), now()));
        assert!(!DateWindow::Month.contains(two_months.as_deref(), now()));
        assert!(DateWindow::All.contains(None, now()));
        assert!(!DateWindow::Week.contains(Some("garbage"), now()));
    }

    #[test]
    fn bare_dates_are_accepted() {
        assert!(DateWindow::Today.contains(Some("2026-03-15"), now()));
    }

    #[test]
    fn window_parse_defaults_to_all() {
        assert_eq!(DateWindow::parse("week"), DateWindow::Week);
        assert_eq!(DateWindow::parse("yesterday"), DateWindow::All);
    }

    #[test]
    fn payment_totals_follow_filtered_rows() {
        let payments = vec![
            payment("PAY-1", "paye", local_iso(2026, 3, 15, 9), (7500.0, 7500.0, 0.0)),
            payment("PAY-2", "partiel", local_iso(2026, 3, 1, 9), (50_000.0, 20_000.0, 30_000.0)),
        ];
        let filter = ListFilter {
            window: DateWindow::Today,
            ..ListFilter::default()
        };
        let totals = PaymentTotals::of(&filter.apply(&payments, now()));
        assert_eq!(totals.count, 1);
        assert_eq!(totals.total, 7500.0);

        let all = PaymentTotals::of(&payments);
        assert_eq!(all.paid, 27_500.0);
        assert_eq!(all.remaining, 30_000.0);
    }

    #[test]
    fn age_subtracts_one_before_birthday() {
        let birth = NaiveDate::from_ymd_opt(1990, 5, 2).unwrap();
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()), 35);
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2026, 5, 2).unwrap()), 36);
        assert_eq!(age_from_iso("not a date"), None);
    }

    #[test]
    fn display_date_falls_back_to_dash() {
        assert_eq!(display_date(Some("2026-03-15")), "15/03/2026");
        assert_eq!(display_date(None), "-");
    }
}
