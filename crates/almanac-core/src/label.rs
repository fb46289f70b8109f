use chrono::NaiveDate;

/// Locale-formatting collaborator. The engine never embeds its own text
/// localization; every human-readable label goes through an
/// implementation of this trait.
pub trait LocaleLabels {
    /// e.g. "March 2024", the month header for grids and pickers.
    fn month_year_label(&self, date: NaiveDate) -> String;

    /// e.g. "2024-03-14", compact date for tables and picker inputs.
    fn short_date_label(&self, date: NaiveDate) -> String;

    /// e.g. "Thursday, March 14, 2024", the day-view header.
    fn long_date_label(&self, date: NaiveDate) -> String;

    /// e.g. "Thu 14", the week strip column header.
    fn weekday_label(&self, date: NaiveDate) -> String;

    /// Monday-first column headers for the month grid.
    fn weekday_labels(&self) -> Vec<&'static str>;
}

/// Default English formatter backed by chrono's format strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabels;

impl LocaleLabels for EnglishLabels {
    fn month_year_label(&self, date: NaiveDate) -> String {
        date.format("%B %Y").to_string()
    }

    fn short_date_label(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    fn long_date_label(&self, date: NaiveDate) -> String {
        date.format("%A, %B %-d, %Y").to_string()
    }

    fn weekday_label(&self, date: NaiveDate) -> String {
        date.format("%a %d").to_string()
    }

    fn weekday_labels(&self) -> Vec<&'static str> {
        vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn english_labels_format_a_known_day() {
        let labels = EnglishLabels;
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).expect("valid date");

        assert_eq!(labels.month_year_label(date), "March 2024");
        assert_eq!(labels.short_date_label(date), "2024-03-14");
        assert_eq!(labels.long_date_label(date), "Thursday, March 14, 2024");
        assert_eq!(labels.weekday_label(date), "Thu 14");
        assert_eq!(labels.weekday_labels().len(), 7);
        assert_eq!(labels.weekday_labels()[0], "Mon");
    }
}
