use std::fs::{self, File};
use std::io;
use std::path::Path;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use shared::models::CompanyContactRow;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{SENDER_EMAIL, SMTP_HOST, SMTP_PASSWORD, SMTP_PORT, SMTP_USER};
use crate::error::ApiError;

// Result sets above this size are never serialized to JSON; they leave as
// a zipped CSV attached to a notification email.
pub const EXPORT_ROW_LIMIT: usize = 5000;

const CSV_NAME: &str = "companies_and_contacts_extracted.csv";
const ARCHIVE_NAME: &str = "results.zip";

pub(crate) const CSV_HEADER: [&str; 43] = [
    "Company Id",
    "Company Name",
    "Company Domain",
    "Company Website",
    "Company Telephone",
    "Company Fax Number",
    "Company Size",
    "Company Founded",
    "Company Street Number",
    "Company Route",
    "Company Postal Code",
    "Company Locality",
    "Company Admin Area Level 1",
    "Company Admin Area Level 2",
    "Company Country",
    "Company Email",
    "Company Social Profile URL",
    "Company Type",
    "Company Industry",
    "Company Creation Date",
    "Company Update Date",
    "Contact Id",
    "Contact Gender",
    "Contact First Name",
    "Contact Last Name",
    "Contact Job Title",
    "Contact Job Function",
    "Contact Job Level",
    "Contact Telephone",
    "Contact Street Number",
    "Contact Route",
    "Contact Postal Code",
    "Contact Locality",
    "Contact Admin Area Level 1",
    "Contact Admin Area Level 2",
    "Contact Country",
    "Contact Email",
    "Contact Email Status",
    "Contact Email Creation Date",
    "Contact Social Profile URL",
    "Contact Industry",
    "Contact Creation Date",
    "Contact Update Date",
];

// Writes the rows to a semicolon CSV, zips it and mails the archive to the
// configured recipient. The work directory is unique per call so parallel
// exports cannot clobber each other, and it is removed whether or not the
// send succeeded.
pub async fn deliver_by_email(
    rows: &[CompanyContactRow],
    recipient: &str,
) -> Result<(), ApiError> {
    let work_dir = std::env::temp_dir().join(format!("prospect_export_{}", Uuid::new_v4()));
    fs::create_dir_all(&work_dir).map_err(|e| ApiError::Export(e.to_string()))?;

    let csv_path = work_dir.join(CSV_NAME);
    let archive_path = work_dir.join(ARCHIVE_NAME);

    let outcome = async {
        write_csv(rows, &csv_path)?;
        compress_csv(&csv_path, &archive_path)?;
        send_archive(&archive_path, recipient).await
    }
    .await;

    if let Err(e) = fs::remove_dir_all(&work_dir) {
        warn!("could not remove export directory {}: {e}", work_dir.display());
    }

    outcome
}

pub(crate) fn write_csv(rows: &[CompanyContactRow], path: &Path) -> Result<(), ApiError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .map_err(|e| ApiError::Export(e.to_string()))?;

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| ApiError::Export(e.to_string()))?;
    for row in rows {
        writer
            .write_record(csv_record(row))
            .map_err(|e| ApiError::Export(e.to_string()))?;
    }
    writer.flush().map_err(|e| ApiError::Export(e.to_string()))
}

// Column order follows CSV_HEADER, not the JSON field order: the date
// columns close each block and the admin area levels come as 1 then 2.
fn csv_record(row: &CompanyContactRow) -> [&str; 43] {
    [
        row.comp_id.as_str(),
        row.comp_name.as_deref().unwrap_or(""),
        row.comp_domain.as_deref().unwrap_or(""),
        row.comp_website.as_deref().unwrap_or(""),
        row.comp_telephone.as_deref().unwrap_or(""),
        row.comp_fax_number.as_deref().unwrap_or(""),
        row.comp_size.as_deref().unwrap_or(""),
        row.comp_founded.as_deref().unwrap_or(""),
        row.comp_street_number.as_deref().unwrap_or(""),
        row.comp_route.as_deref().unwrap_or(""),
        row.comp_postal_code.as_deref().unwrap_or(""),
        row.comp_locality.as_deref().unwrap_or(""),
        row.comp_administrative_area_level_1.as_deref().unwrap_or(""),
        row.comp_administrative_area_level_2.as_deref().unwrap_or(""),
        row.comp_country.as_deref().unwrap_or(""),
        row.comp_email.as_deref().unwrap_or(""),
        row.comp_soc_prof_url.as_deref().unwrap_or(""),
        row.comp_type.as_deref().unwrap_or(""),
        row.comp_industry.as_deref().unwrap_or(""),
        row.comp_created_on.as_deref().unwrap_or(""),
        row.comp_updated_on.as_deref().unwrap_or(""),
        row.cont_id.as_deref().unwrap_or(""),
        row.cont_gender.as_deref().unwrap_or(""),
        row.cont_first_name.as_deref().unwrap_or(""),
        row.cont_last_name.as_deref().unwrap_or(""),
        row.cont_job_title.as_deref().unwrap_or(""),
        row.cont_job_function.as_deref().unwrap_or(""),
        row.cont_job_level.as_deref().unwrap_or(""),
        row.cont_telephone.as_deref().unwrap_or(""),
        row.cont_street_number.as_deref().unwrap_or(""),
        row.cont_route.as_deref().unwrap_or(""),
        row.cont_postal_code.as_deref().unwrap_or(""),
        row.cont_locality.as_deref().unwrap_or(""),
        row.cont_administrative_area_level_1.as_deref().unwrap_or(""),
        row.cont_administrative_area_level_2.as_deref().unwrap_or(""),
        row.cont_country.as_deref().unwrap_or(""),
        row.cont_email.as_deref().unwrap_or(""),
        row.cont_email_status.as_deref().unwrap_or(""),
        row.cont_email_created_on.as_deref().unwrap_or(""),
        row.cont_soc_prof_url.as_deref().unwrap_or(""),
        row.cont_industry.as_deref().unwrap_or(""),
        row.cont_created_on.as_deref().unwrap_or(""),
        row.cont_updated_on.as_deref().unwrap_or(""),
    ]
}

fn compress_csv(csv_path: &Path, archive_path: &Path) -> Result<(), ApiError> {
    let archive = File::create(archive_path).map_err(|e| ApiError::Export(e.to_string()))?;
    let mut zip = zip::ZipWriter::new(archive);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(CSV_NAME, options)
        .map_err(|e| ApiError::Export(e.to_string()))?;
    let mut csv_file = File::open(csv_path).map_err(|e| ApiError::Export(e.to_string()))?;
    io::copy(&mut csv_file, &mut zip).map_err(|e| ApiError::Export(e.to_string()))?;
    zip.finish().map_err(|e| ApiError::Export(e.to_string()))?;

    Ok(())
}

async fn send_archive(archive_path: &Path, recipient: &str) -> Result<(), ApiError> {
    let archive = fs::read(archive_path).map_err(|e| ApiError::Export(e.to_string()))?;
    let attachment = Attachment::new(ARCHIVE_NAME.to_string()).body(
        archive,
        ContentType::parse("application/zip").map_err(|e| ApiError::Export(e.to_string()))?,
    );

    let from: Mailbox = SENDER_EMAIL
        .parse()
        .map_err(|e: lettre::address::AddressError| ApiError::Export(e.to_string()))?;
    let to: Mailbox = recipient
        .parse()
        .map_err(|e: lettre::address::AddressError| ApiError::Export(e.to_string()))?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject("Database extraction done !")
        .multipart(
            MultiPart::mixed()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(String::from("Please find enclosed the extracted results.")),
                )
                .singlepart(attachment),
        )
        .map_err(|e| ApiError::Export(e.to_string()))?;

    let mailer: AsyncSmtpTransport<Tokio1Executor> =
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(SMTP_HOST)
            .map_err(|e| ApiError::Export(e.to_string()))?
            .port(SMTP_PORT)
            .credentials(Credentials::new(SMTP_USER.to_string(), SMTP_PASSWORD.to_string()))
            .build();

    mailer
        .send(message)
        .await
        .map_err(|e| ApiError::Export(e.to_string()))?;

    info!("extraction archive sent to {recipient}");
    Ok(())
}
