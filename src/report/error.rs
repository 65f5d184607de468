use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("The report template can't be loaded.")]
    CantLoadTemplate(#[source] tera::Error),
    #[error("The report can't be rendered.")]
    CantRenderReport(#[source] tera::Error),
    #[error("The CSV export can't be written.")]
    CantWriteCsv,
    #[error("The report file can't be written [path: {0}]")]
    CantWriteFile(String),
}
