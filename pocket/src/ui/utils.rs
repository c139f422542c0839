use chrono::{DateTime, Local, TimeZone, Utc};
use pocket_api::endpoints::postings::{Posting, PostingStatus};
use ratatui::{style::Style, text::Span};
use rust_decimal::Decimal;

use super::theme;

/// Symbol for the currencies the service settles in, the code itself otherwise
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        "CHF" => "CHF ",
        "JPY" => "¥",
        other => other,
    }
}

/// Format a money value with two decimals, e.g. `€1234.50`
pub fn fmt_money(value: Decimal, currency: &str) -> String {
    format!("{}{:.2}", currency_symbol(currency), value.round_dp(2))
}

/// Signed amount of a posting: `+ €12.50` for credits, `- €12.50` for debits
pub fn fmt_posting_amount(posting: &Posting) -> Span<'static> {
    let Some(amount) = posting.amount() else {
        return Span::raw("");
    };
    let sign = if amount.is_credit() { '+' } else { '-' };
    let text = format!(
        "{} {}",
        sign,
        fmt_money(amount.value().abs(), &posting.currency)
    );
    Span::styled(
        text,
        Style::default().fg(theme::amount_color(amount.is_credit())),
    )
}

/// Local wall-clock time of a posting, `--:--` when no timestamp parses
pub fn fmt_posting_time<Tz: TimeZone>(posting: &Posting, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    posting_time(posting)
        .map(|t| t.with_timezone(tz).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Full local date and time for the details screen
pub fn fmt_posting_datetime(posting: &Posting) -> String {
    posting_time(posting)
        .map(|t| t.with_timezone(&Local).format("%A %-d %B %Y, %H:%M").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn posting_time(posting: &Posting) -> Option<DateTime<Utc>> {
    posting.created_time().or_else(|| posting.action_time())
}

pub fn status_span(status: PostingStatus) -> Span<'static> {
    let style = match status {
        PostingStatus::Pending => Style::default().fg(theme::COLOR_PENDING),
        PostingStatus::Failed | PostingStatus::Cancelled => {
            Style::default().fg(theme::COLOR_FAILED)
        }
        PostingStatus::Completed | PostingStatus::Unknown => theme::help_text_style(),
    };
    Span::styled(status.to_string(), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn posting(credit: Option<Decimal>, debit: Option<Decimal>) -> Posting {
        Posting {
            action_key: "2024-06-15T08:30:00Z".to_string(),
            action: "Coffee".to_string(),
            created: None,
            status: PostingStatus::Completed,
            currency: "EUR".to_string(),
            debit,
            credit,
        }
    }

    #[test]
    fn amounts_are_signed_by_side() {
        let credit = posting(Some(Decimal::new(1250, 2)), None);
        assert_eq!(fmt_posting_amount(&credit).content, "+ €12.50");

        let debit = posting(None, Some(Decimal::new(35, 1)));
        assert_eq!(fmt_posting_amount(&debit).content, "- €3.50");
    }

    #[test]
    fn missing_amount_renders_nothing() {
        assert_eq!(fmt_posting_amount(&posting(None, None)).content, "");
    }

    #[test]
    fn unknown_currency_falls_back_to_code() {
        assert_eq!(fmt_money(Decimal::new(1, 0), "SEK"), "SEK1.00");
    }

    #[test]
    fn time_is_shown_in_the_given_zone() {
        let p = posting(None, Some(Decimal::ONE));
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(fmt_posting_time(&p, &tz), "10:30");

        let mut undated = p.clone();
        undated.action_key = "not-a-date".to_string();
        assert_eq!(fmt_posting_time(&undated, &tz), "--:--");
    }
}
