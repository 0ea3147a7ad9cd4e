use rust_decimal::Decimal;

pub fn write_csv<I, R, W>(records: I, writer: W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = R>,
    R: serde::Serialize,
    W: std::io::Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records.into_iter() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Format an amount in taka with lakh grouping, e.g. ৳12,34,567.50.
/// Amounts are rounded to two decimal places and trailing zeros dropped.
pub fn format_bdt(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };
    let mut out = String::new();
    if rounded.is_sign_negative() {
        out.push('-');
    }
    out.push('৳');
    out.push_str(&group_lakh(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Group integer digits in the South Asian style: the last three digits
/// together, then groups of two (12,34,56,789).
fn group_lakh(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = vec![tail.to_string()];
    let mut i = head.len();
    while i > 2 {
        groups.push(head[i - 2..i].to_string());
        i -= 2;
    }
    groups.push(head[..i].to_string());
    groups.reverse();
    groups.join(",")
}
