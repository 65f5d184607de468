use crate::api::backup::run_backup;
use crate::api::clients::{create_client, delete_client, get_client, send_reminder, update_client};
use crate::api::error::friendly_payment_error;
use crate::api::measurements::{
    create_measurement, delete_measurement, download_client_report, download_measurement_report,
};
use crate::api::payments::{PaymentDraft, create_payment, delete_payment};
use crate::api::{ApiClient, GymData, auth, load_all};
use crate::client::extras::{ClientExtras, ClientExtrasMap, remove_client_extras, save_client_extras};
use crate::client::{ClientView, PaymentView, build_client_views};
use crate::command::args::{Command, USAGE};
use crate::dashboard::{StatusFilter, compute_statistics, search_clients};
use crate::error::ApplicationError::{PaymentRejected, UnknownClient};
use crate::error::Result;
use crate::reminder::reminder_link;
use crate::report::client_report::{create_report_renderer, render_client_report};
use crate::report::payments_csv::export_payments_csv;
use crate::report::{
    client_report_filename, measurement_pdf_filename, measurements_pdf_filename,
    payments_csv_filename, write_report_file,
};
use crate::store::{AUTH_TOKEN_KEY, LAST_BACKUP_KEY, Store};
use crate::tools::currency::format_colones;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use dto::client::{ClientCreateRequest, ClientUpdateRequest};
use dto::client_status::ClientStatus;
use dto::dates::format_date;
use dto::measurement::{BmiCategory, BodyMetrics, MeasurementCreateRequest, MeasurementResponse};
use dto::membership_term::{MembershipTerm, initial_due_date, renew_due_date};
use std::path::Path;

pub mod args;

const BACKUP_FAILED_MESSAGE: &str = "No se pudo ejecutar el respaldo.";

/// Everything known about a single client.
struct ClientData {
    view: ClientView,
    payments: Vec<PaymentView>,
    measurements: Vec<MeasurementResponse>,
}

/// Runs commands against the backend, keeping its own data in `store`.
pub struct Console<'a, S: Store> {
    api: ApiClient,
    backup_token: Option<String>,
    store: &'a mut S,
    now: DateTime<FixedOffset>,
}

impl<'a, S: Store> Console<'a, S> {
    pub fn new(
        api: ApiClient,
        backup_token: Option<String>,
        store: &'a mut S,
        now: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            api,
            backup_token,
            store,
            now,
        }
    }

    /// Wall-clock time at the front desk, which due dates are compared to.
    fn local_now(&self) -> NaiveDateTime {
        self.now.naive_local()
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Run `command` and return what should be shown to the user.
    pub async fn execute(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Help => Ok(USAGE.to_owned()),
            Command::Login { username, password } => self.login(&username, &password).await,
            Command::Logout => {
                self.store.remove(AUTH_TOKEN_KEY);
                Ok("Sesión cerrada.".to_owned())
            }
            Command::Dashboard => self.dashboard().await,
            Command::Clients { search, filter } => self.clients(search.as_deref(), filter).await,
            Command::Renew { client_id, term } => self.renew(client_id, term).await,
            Command::Pay(draft) => self.pay(&draft).await,
            Command::AddClient {
                request,
                extras,
                term,
            } => self.add_client(&request, extras, term).await,
            Command::UpdateClient {
                client_id,
                request,
                extras,
            } => self.update_client(client_id, &request, extras).await,
            Command::DeleteClient { client_id } => self.delete_client(client_id).await,
            Command::DeletePayment { payment_id } => {
                delete_payment(&self.api, payment_id).await?;
                Ok(format!("Pago {payment_id} eliminado."))
            }
            Command::AddMeasurement(request) => self.add_measurement(&request).await,
            Command::DeleteMeasurement { measurement_id } => {
                delete_measurement(&self.api, measurement_id).await?;
                Ok(format!("Medición {measurement_id} eliminada."))
            }
            Command::Report { client_id, output } => self.report(client_id, &output).await,
            Command::PaymentsCsv { client_id, output } => {
                self.payments_csv(client_id, &output).await
            }
            Command::MeasurementsPdf {
                client_id,
                measurement_id,
                output,
            } => {
                self.measurements_pdf(client_id, measurement_id, &output)
                    .await
            }
            Command::Reminder { client_id, server } => self.reminder(client_id, server).await,
            Command::Backup => self.backup().await,
        }
    }

    async fn login(&mut self, username: &str, password: &str) -> Result<String> {
        let response = auth::login(&self.api, username, password).await?;
        self.store.write(AUTH_TOKEN_KEY, response.token())?;
        Ok(format!(
            "Sesión iniciada como {username} (expira: {}).",
            response.expires_at()
        ))
    }

    fn client_views(&self, data: &GymData) -> Vec<ClientView> {
        build_client_views(
            data.clients(),
            data.payments(),
            &ClientExtrasMap::load(&*self.store),
            &self.local_now(),
        )
    }

    async fn load_client_data(&self, client_id: u64) -> Result<ClientData> {
        let data = load_all(&self.api).await?;
        let view = self
            .client_views(&data)
            .into_iter()
            .find(|view| *view.id() == client_id)
            .ok_or(UnknownClient(client_id))?;
        let payments = data
            .payments()
            .iter()
            .filter(|payment| *payment.client_id() == client_id)
            .map(PaymentView::from)
            .collect();
        let measurements = data
            .measurements()
            .iter()
            .filter(|measurement| *measurement.client_id() == client_id)
            .cloned()
            .collect();

        Ok(ClientData {
            view,
            payments,
            measurements,
        })
    }

    async fn dashboard(&self) -> Result<String> {
        let data = load_all(&self.api).await?;
        let clients = self.client_views(&data);
        let payments: Vec<PaymentView> = data.payments().iter().map(PaymentView::from).collect();
        let statistics = compute_statistics(&clients, &payments, &self.today());

        let mut output = statistics.to_string();
        if let Some(last_backup) = self.store.read::<String>(LAST_BACKUP_KEY) {
            output.push_str(&format!("\nÚltimo respaldo:   {last_backup}"));
        }
        Ok(output)
    }

    async fn clients(&self, search: Option<&str>, filter: StatusFilter) -> Result<String> {
        let data = load_all(&self.api).await?;
        let clients = self.client_views(&data);
        let found = filter.apply(search_clients(&clients, search.unwrap_or_default()));
        if found.is_empty() {
            return Ok("Ningún cliente encontrado.".to_owned());
        }

        Ok(found
            .iter()
            .map(|client| {
                format!(
                    "{:>5}  {:<28} {:<12} {:<16} {}",
                    client.id(),
                    client.full_name(),
                    client.phone(),
                    client.status_badge(&self.local_now()),
                    client
                        .due_date()
                        .as_ref()
                        .map(format_date)
                        .unwrap_or_else(|| "-".to_owned())
                )
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn renew(&self, client_id: u64, term: Option<MembershipTerm>) -> Result<String> {
        let client = self.load_client_data(client_id).await?.view;
        let term = term.unwrap_or(*client.term());
        let due_date = renew_due_date(client.due_date().as_ref(), term, &self.today())?;
        let request = ClientUpdateRequest::default()
            .with_status(ClientStatus::Active)
            .with_due_date(due_date);
        update_client(&self.api, client_id, &request).await?;
        info!("Membership renewed [client: {client_id}, term: {term}, due date: {due_date}]");

        Ok(format!(
            "Membresía de {} renovada ({term}) hasta el {}.",
            client.full_name(),
            format_date(&due_date)
        ))
    }

    async fn pay(&self, draft: &PaymentDraft) -> Result<String> {
        let payment = create_payment(&self.api, draft).await.map_err(|e| {
            if e.is_unauthorized() {
                e.into()
            } else {
                PaymentRejected(friendly_payment_error(&e))
            }
        })?;

        Ok(format!(
            "Pago registrado: {} ({}, {}) para el cliente {} el {}.",
            format_colones(payment.amount()),
            draft.term(),
            draft.method(),
            payment.client_id(),
            format_date(payment.payment_date())
        ))
    }

    async fn add_client(
        &mut self,
        request: &ClientCreateRequest,
        extras: ClientExtras,
        term: Option<MembershipTerm>,
    ) -> Result<String> {
        let client = create_client(&self.api, request).await?;
        let client_id = *client.id();
        if extras.emergency_contact().is_some() {
            save_client_extras(&mut *self.store, client_id, extras)?;
        }

        let mut output = format!("Cliente creado: {} [id: {client_id}].", client.full_name());
        if let Some(term) = term {
            let due_date = initial_due_date(&self.today(), term)?;
            let request = ClientUpdateRequest::default()
                .with_status(ClientStatus::Active)
                .with_due_date(due_date);
            update_client(&self.api, client_id, &request).await?;
            output.push_str(&format!(
                "\nMembresía {term} hasta el {}.",
                format_date(&due_date)
            ));
        }
        Ok(output)
    }

    async fn update_client(
        &mut self,
        client_id: u64,
        request: &ClientUpdateRequest,
        extras: Option<ClientExtras>,
    ) -> Result<String> {
        let client = update_client(&self.api, client_id, request).await?;
        match extras {
            Some(extras) if extras.emergency_contact().is_some() => {
                save_client_extras(&mut *self.store, client_id, extras)?
            }
            Some(_) => remove_client_extras(&mut *self.store, client_id)?,
            None => {}
        }
        info!("Client updated [id: {client_id}]");
        Ok(format!(
            "Cliente actualizado: {} [id: {client_id}].",
            client.full_name()
        ))
    }

    async fn add_measurement(&self, request: &MeasurementCreateRequest) -> Result<String> {
        let measurement = create_measurement(&self.api, request).await?;
        let bmi = measurement
            .bmi()
            .map(|bmi| format!("{bmi:.1} ({})", BmiCategory::from_bmi(bmi)))
            .unwrap_or_else(|| "-".to_owned());
        Ok(format!(
            "Medición registrada para el cliente {} el {} [id: {}]. IMC: {bmi}",
            measurement.client_id(),
            format_date(measurement.date()),
            measurement.id()
        ))
    }

    async fn delete_client(&mut self, client_id: u64) -> Result<String> {
        delete_client(&self.api, client_id).await?;
        remove_client_extras(&mut *self.store, client_id)?;
        Ok(format!("Cliente {client_id} eliminado."))
    }

    async fn report(&self, client_id: u64, output: &Path) -> Result<String> {
        let data = self.load_client_data(client_id).await?;
        let tera = create_report_renderer()?;
        let report = render_client_report(
            &tera,
            &data.view,
            &data.payments.iter().collect::<Vec<_>>(),
            &data.measurements.iter().collect::<Vec<_>>(),
            &self.local_now(),
        )?;
        let filename = client_report_filename(&data.view, &self.today());
        let path = write_report_file(output, &filename, report.as_bytes())?;
        Ok(format!("Reporte exportado: {}", path.display()))
    }

    async fn payments_csv(&self, client_id: u64, output: &Path) -> Result<String> {
        let data = self.load_client_data(client_id).await?;
        let csv = export_payments_csv(&data.payments.iter().collect::<Vec<_>>())?;
        let filename = payments_csv_filename(&data.view, &self.today());
        let path = write_report_file(output, &filename, csv.as_bytes())?;
        Ok(format!(
            "{} pagos exportados: {}",
            data.payments.len(),
            path.display()
        ))
    }

    async fn measurements_pdf(
        &self,
        client_id: u64,
        measurement_id: Option<u64>,
        output: &Path,
    ) -> Result<String> {
        let (pdf, filename) = match measurement_id {
            Some(measurement_id) => (
                download_measurement_report(&self.api, measurement_id).await?,
                measurement_pdf_filename(measurement_id),
            ),
            None => {
                let client = get_client(&self.api, client_id).await?;
                (
                    download_client_report(&self.api, client_id).await?,
                    measurements_pdf_filename(&client.full_name()),
                )
            }
        };
        let path = write_report_file(output, &filename, &pdf)?;
        Ok(format!("PDF descargado: {}", path.display()))
    }

    async fn reminder(&self, client_id: u64, server: bool) -> Result<String> {
        if server {
            send_reminder(&self.api, client_id).await?;
            return Ok(format!("Recordatorio enviado al cliente {client_id}."));
        }
        let client = self.load_client_data(client_id).await?.view;
        Ok(reminder_link(&client, &self.local_now())?.to_string())
    }

    async fn backup(&mut self) -> Result<String> {
        let backup = run_backup(&self.api, self.backup_token.as_deref()).await?;
        if !backup.success() {
            let message = backup
                .output()
                .as_deref()
                .map(str::trim)
                .filter(|output| !output.is_empty())
                .unwrap_or(BACKUP_FAILED_MESSAGE);
            return Ok(format!("Error de respaldo: {message}"));
        }

        let completed_at = self.now.to_utc().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.store.write(LAST_BACKUP_KEY, &completed_at)?;
        Ok("Respaldo completado: la copia en la nube se actualizó correctamente.".to_owned())
    }
}
