use crate::api::export::ExportStatusResponse;
use crate::api::format::{CurrencyResponse, FormatQuery, WordsResponse};
use crate::api::images::DataUriUpload;
use crate::export::ExportStatus;
use crate::model::{ImageSlot, LineItem, LineItemKind, LineItemPatch, RecordPatch, SalaryRecord, SavedSlip};
use crate::render::{AmountRow, AmountSection, HeaderView, InfoField, SignatureView, SlipView};
use crate::totals::Totals;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Slip Gaji API",
        version = "1.0.0",
        description = r#"
## Salary Slip Generator

Fill in one salary slip, preview it, keep snapshots and export it as a PDF.

### 🔹 Key Features
- **Record editing**
  - Employee, company and slip fields, earnings and deduction line items
  - Company logo, signature and stamp images stored as data URIs
- **Preview**
  - Derived totals, Rupiah formatting and the amount in Indonesian words
- **Saved slips**
  - Save snapshots, load or delete them with explicit confirmation
- **Export**
  - A4 PDF named `Slip_Gaji_<name>_<period>.pdf`

### 💾 Persistence
The live record and the saved list are written through to JSON files on
every change and merged with defaults on startup.

---
Built with **Rust**, **Actix Web**, **genpdf** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::record::get_record,
        crate::api::record::replace_record,
        crate::api::record::patch_record,

        crate::api::line_items::add_item,
        crate::api::line_items::update_item,
        crate::api::line_items::remove_item,

        crate::api::images::upload_image,
        crate::api::images::set_image_data_uri,
        crate::api::images::clear_image,

        crate::api::preview::get_totals,
        crate::api::preview::get_preview,

        crate::api::format::currency,
        crate::api::format::words,

        crate::api::saved_slips::list_saved,
        crate::api::saved_slips::save_slip,
        crate::api::saved_slips::load_slip,
        crate::api::saved_slips::delete_slip,

        crate::api::export::start_export,
        crate::api::export::export_status,
        crate::api::export::download_latest
    ),
    components(
        schemas(
            SalaryRecord,
            RecordPatch,
            LineItem,
            LineItemKind,
            LineItemPatch,
            ImageSlot,
            DataUriUpload,
            SavedSlip,
            Totals,
            SlipView,
            HeaderView,
            InfoField,
            AmountRow,
            AmountSection,
            SignatureView,
            FormatQuery,
            CurrencyResponse,
            WordsResponse,
            ExportStatus,
            ExportStatusResponse
        )
    ),
    tags(
        (name = "Record", description = "Live salary record"),
        (name = "Line Items", description = "Allowances and other deductions"),
        (name = "Images", description = "Logo, signature and stamp uploads"),
        (name = "Preview", description = "Totals and rendered slip layout"),
        (name = "Format", description = "Rupiah and amount-in-words helpers"),
        (name = "Saved Slips", description = "Snapshots of the record"),
        (name = "Export", description = "PDF export"),
    )
)]
pub struct ApiDoc;
