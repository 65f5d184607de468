use crate::client::ClientView;
use crate::report::error::ReportError;
use crate::report::error::ReportError::CantWriteFile;
use chrono::NaiveDate;
use diacritics::remove_diacritics;
use std::fs;
use std::path::{Path, PathBuf};

pub mod client_report;
pub mod error;
pub mod filters;
pub mod payments_csv;

const DEFAULT_SLUG: &str = "cliente";

/// `reporte-<slug>-<yyyy-mm-dd>.txt`
pub fn client_report_filename(client: &ClientView, today: &NaiveDate) -> String {
    format!(
        "reporte-{}-{}.txt",
        slugify(&client.full_name()),
        today.format("%Y-%m-%d")
    )
}

/// `pagos-<slug>-<yyyy-mm-dd>.csv`
pub fn payments_csv_filename(client: &ClientView, today: &NaiveDate) -> String {
    format!(
        "pagos-{}-{}.csv",
        slugify(&client.full_name()),
        today.format("%Y-%m-%d")
    )
}

/// `mediciones_<slug>.pdf`
pub fn measurements_pdf_filename(client_name: &str) -> String {
    format!("mediciones_{}.pdf", slugify(client_name))
}

/// `medicion_<id>.pdf`
pub fn measurement_pdf_filename(measurement_id: u64) -> String {
    format!("medicion_{measurement_id}.pdf")
}

/// ASCII only, every run of other characters replaced by a single `_`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for character in remove_diacritics(value).chars() {
        if character.is_ascii_alphanumeric() {
            slug.push(character);
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        DEFAULT_SLUG.to_owned()
    } else {
        slug.to_owned()
    }
}

/// Write `content` to `directory/filename`, creating the directory if needed.
pub fn write_report_file(
    directory: &Path,
    filename: &str,
    content: &[u8],
) -> Result<PathBuf, ReportError> {
    let path = directory.join(filename);
    let cant_write = || CantWriteFile(path.display().to_string());
    fs::create_dir_all(directory).map_err(|e| {
        error!("Can't create report directory `{}`.\n{e:#?}", directory.display());
        cant_write()
    })?;
    fs::write(&path, content).map_err(|e| {
        error!("Can't write report `{}`.\n{e:#?}", path.display());
        cant_write()
    })?;
    info!("Report written to `{}`.", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::build_client_views;
    use crate::client::extras::ClientExtrasMap;
    use crate::client::tests::{date, now};
    use crate::tools::test::tests::temp_dir;
    use dto::client::ClientResponse;
    use dto::client_status::ClientStatus;
    use parameterized::{ide, parameterized};

    ide!();

    fn view_named(first_name: &str, last_name: &str) -> ClientView {
        let client = ClientResponse::new_test(1, ClientStatus::Active, None)
            .with_names(first_name, Some(last_name));
        build_client_views(&[client], &[], &ClientExtrasMap::default(), &now()).remove(0)
    }

    fn view() -> ClientView {
        view_named("José", "Núñez Ávila")
    }

    #[parameterized(
        name = {"Jon Doe", "José Núñez Ávila", "  Jon--Doe  ", "Ñandú", "!!!", ""},
        expected_slug = {"Jon_Doe", "Jose_Nunez_Avila", "Jon_Doe", "Nandu", "cliente", "cliente"}
    )]
    fn should_slugify(name: &str, expected_slug: &str) {
        assert_eq!(expected_slug, slugify(name));
    }

    #[test]
    fn should_name_report_files() {
        let client = view();
        let today = date(2024, 3, 1);
        assert_eq!(
            "reporte-Jose_Nunez_Avila-2024-03-01.txt",
            client_report_filename(&client, &today)
        );
        assert_eq!(
            "pagos-Jose_Nunez_Avila-2024-03-01.csv",
            payments_csv_filename(&client, &today)
        );
        assert_eq!(
            "mediciones_Jose_Nunez_Avila.pdf",
            measurements_pdf_filename(&client.full_name())
        );
        assert_eq!("medicion_5.pdf", measurement_pdf_filename(5));
    }

    #[test]
    fn should_keep_report_inside_output_directory() {
        let client = view_named("Jon", "../../escaped/Doe");
        let directory = temp_dir().join("reports");

        let filename = client_report_filename(&client, &date(2024, 3, 1));
        let path = write_report_file(&directory, &filename, b"content").unwrap();

        assert_eq!("reporte-Jon_escaped_Doe-2024-03-01.txt", filename);
        assert_eq!(Some(directory.as_path()), path.parent());
    }

    #[test]
    fn should_write_report_file() {
        let directory = temp_dir().join("reports");

        let path = write_report_file(&directory, "report.txt", b"content").unwrap();

        assert_eq!(directory.join("report.txt"), path);
        assert_eq!("content", fs::read_to_string(path).unwrap());
    }
}
