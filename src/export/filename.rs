use crate::model::SalaryRecord;

/// Replace every run of whitespace with a single underscore.
fn underscore_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;

    for ch in value.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

fn part_or(value: &str, fallback: &str) -> String {
    let part = underscore_whitespace(value);
    if part.is_empty() {
        fallback.to_string()
    } else {
        part
    }
}

/// `Slip_Gaji_<name>_<period>` without extension.
pub fn export_basename(record: &SalaryRecord) -> String {
    format!(
        "Slip_Gaji_{}_{}",
        part_or(&record.employee_name, "Karyawan"),
        part_or(&record.period, "Periode")
    )
}

pub fn export_filename(record: &SalaryRecord) -> String {
    format!("{}.pdf", export_basename(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, period: &str) -> SalaryRecord {
        SalaryRecord {
            employee_name: name.into(),
            period: period.into(),
            ..SalaryRecord::default()
        }
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(
            export_filename(&record("Budi  Santoso", "Januari\t2026")),
            "Slip_Gaji_Budi_Santoso_Januari_2026.pdf"
        );
    }

    #[test]
    fn empty_fields_use_fallbacks() {
        assert_eq!(export_basename(&record("", "")), "Slip_Gaji_Karyawan_Periode");
    }
}
