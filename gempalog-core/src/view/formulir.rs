use crate::{
    store::{AidRecord, AidType},
    view::Document,
};

/// Field prompts, in the order the form asks for them.
pub const FIELD_SENDER: &str = "Nama Pengirim";
pub const FIELD_AID_TYPE: &str = "Jenis Bantuan";
pub const FIELD_QUANTITY: &str = "Jumlah";
pub const FIELD_DESTINATION: &str = "Lokasi Tujuan";

pub fn render() -> Document {
    let mut doc = Document::new();
    doc.heading("Formulir Pengiriman Bantuan");

    let types: Vec<&str> = AidType::all().iter().map(AidType::as_str).collect();
    doc.push(format!("{FIELD_SENDER}: teks"));
    doc.push(format!("{FIELD_AID_TYPE}: {}", types.join(", ")));
    doc.push(format!("{FIELD_QUANTITY}: bilangan bulat, minimal 1"));
    doc.push(format!("{FIELD_DESTINATION}: teks"));
    doc
}

/// Acknowledgment shown after a record was stored.
pub fn acknowledge(record: &AidRecord) -> Document {
    let mut doc = Document::new();
    doc.success("Data bantuan berhasil disimpan.");
    doc.push(format!(
        "    {} | {} x{} | {} | {}",
        record.sender_name, record.aid_type, record.quantity, record.destination, record.submitted_at
    ));
    doc
}
