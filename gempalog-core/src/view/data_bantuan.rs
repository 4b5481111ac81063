use tracing::warn;

use crate::{
    store::{AidStore, HEADER, aid_type_counts},
    view::{Document, chart::BarChart, table::Table},
};

pub fn render(store: &AidStore) -> Document {
    let mut doc = Document::new();
    doc.heading("Rekap Data Bantuan Masuk");

    if !store.exists() {
        doc.info("Belum ada data bantuan.");
        return doc;
    }

    let records = match store.load_all() {
        Ok(records) => records,
        Err(err) => {
            warn!("aid store unreadable: {err}");
            doc.error(&format!("Gagal membaca data bantuan: {err}"));
            return doc;
        }
    };

    doc.section("Tabel Data Bantuan");
    let mut table = Table::new(HEADER);
    for r in &records {
        table.row([
            r.sender_name.clone(),
            r.aid_type.to_string(),
            r.quantity.to_string(),
            r.destination.clone(),
            r.submitted_at.to_string(),
        ]);
    }
    doc.block(table);

    let total: u64 = records.iter().map(|r| u64::from(r.quantity.get())).sum();
    doc.push(format!("Total: {} kiriman, {} unit", records.len(), total));

    doc.section("Statistik Bantuan per Jenis");
    let chart = aid_type_counts(&records)
        .into_iter()
        .fold(BarChart::new(), |chart, (aid_type, n)| chart.bar(aid_type.as_str(), n as u64));
    if chart.is_empty() {
        doc.info("Belum ada bantuan untuk dihitung.");
    } else {
        doc.block(chart);
    }

    doc
}
