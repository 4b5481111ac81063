use crate::{
    feed::FetchResult,
    model::{EarthquakeEvent, FeltListing},
    view::{Document, map::PointMap, table::Table},
};

const MAP_WIDTH: usize = 64;
const MAP_HEIGHT: usize = 16;

pub fn render(
    recent: &FetchResult<Vec<EarthquakeEvent>>,
    felt: &FetchResult<FeltListing>,
    recent_limit: usize,
) -> Document {
    let mut doc = Document::new();
    doc.heading("Informasi Gempa Real-time dari BMKG");

    doc.section("Gempa Terkini");
    match recent {
        Ok(events) if events.is_empty() => {
            doc.info("Tidak ada data gempa terkini.");
        }
        Ok(events) => {
            doc.block(recent_table(events, recent_limit));
        }
        Err(err) => {
            doc.warning("Gagal mengambil data gempa terkini.");
            doc.push(format!("    {err}"));
        }
    }

    doc.section("Gempa Dirasakan");
    match felt {
        Ok(listing) if listing.is_empty() => {
            doc.info("Tidak ada data gempa dirasakan.");
        }
        Ok(listing) => render_felt(&mut doc, listing),
        Err(err) => {
            doc.warning("Gagal mengambil data gempa dirasakan.");
            doc.push(format!("    {err}"));
        }
    }

    doc
}

fn recent_table(events: &[EarthquakeEvent], limit: usize) -> Table {
    let mut table = Table::new(["Tanggal", "Jam", "Wilayah", "Magnitude", "Kedalaman", "Potensi"]);
    for e in events.iter().take(limit) {
        table.row([&e.date, &e.time, &e.region, &e.magnitude, &e.depth, &e.potential]);
    }
    table
}

fn render_felt(doc: &mut Document, listing: &FeltListing) {
    if !listing.skipped.is_empty() {
        doc.warning(&format!(
            "{} data gempa dirasakan dilewati karena koordinat tidak valid.",
            listing.skipped.len()
        ));
    }

    if listing.events.is_empty() {
        return;
    }

    let map = PointMap::new(MAP_WIDTH, MAP_HEIGHT)
        .points(listing.events.iter().map(|e| (e.latitude, e.longitude)));
    doc.block(map);

    let mut table =
        Table::new(["Tanggal", "Jam", "Wilayah", "Magnitude", "Kedalaman", "Dirasakan"]);
    for e in &listing.events {
        table.row([&e.date, &e.time, &e.region, &e.magnitude, &e.depth, &e.felt_intensity]);
    }
    doc.block(table);
}
