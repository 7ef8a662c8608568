// JSON and `;`-delimited exports of a computed dashboard view.
use crate::error::Result;
use csv::{Writer, WriterBuilder};
use shared::models::DashboardView;
use shared::utils::chilean_format::format_clp;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn write_json<W: Write>(view: &DashboardView, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, view)?;
    Ok(())
}

/// Writes one table per chart into `dir` and returns the paths written.
pub fn export_tables(view: &DashboardView, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let path = dir.join("monthly.csv");
    let mut wtr = table_writer(&path)?;
    wtr.write_record(["mes", "clave", "ventas", "monto", "monto_clp"])?;
    for point in &view.monthly {
        wtr.write_record([
            point.label.clone(),
            point.sort_key.clone(),
            point.orders.to_string(),
            point.revenue.to_string(),
            format_clp(point.revenue),
        ])?;
    }
    wtr.flush()?;
    written.push(path);

    let path = dir.join("top_products.csv");
    let mut wtr = table_writer(&path)?;
    wtr.write_record(["sku", "titulo", "unidades", "monto", "monto_clp"])?;
    for product in &view.top_products {
        wtr.write_record([
            product.sku.clone(),
            product.full_title.clone(),
            product.units.to_string(),
            product.revenue.to_string(),
            format_clp(product.revenue),
        ])?;
    }
    wtr.flush()?;
    written.push(path);

    let path = dir.join("regions.csv");
    let mut wtr = table_writer(&path)?;
    wtr.write_record(["region", "clientes"])?;
    for region in &view.regions {
        wtr.write_record([region.region.clone(), region.customers.to_string()])?;
    }
    wtr.flush()?;
    written.push(path);

    let path = dir.join("status.csv");
    let mut wtr = table_writer(&path)?;
    wtr.write_record(["estado", "cantidad"])?;
    for slice in &view.status {
        wtr.write_record([slice.label.clone(), slice.count.to_string()])?;
    }
    wtr.flush()?;
    written.push(path);

    tracing::info!(dir = %dir.display(), files = written.len(), "Exported dashboard tables");
    Ok(written)
}

fn table_writer(path: &Path) -> Result<Writer<File>> {
    Ok(WriterBuilder::new().delimiter(b';').from_path(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DashboardState;

    fn view() -> DashboardView {
        let csv = "Fecha de venta;Estado;Estado;Comuna;Total (CLP);SKU;Título de la publicación;Unidades\n\
                   01-01-23;Entregado;RM;Providencia;$1.234.567;A;\"Polera; talla M\";1\n\
                   02-01-23;Cancelada;RM;Ñuñoa;$500;B;Taza;2\n";
        let mut state = DashboardState::default();
        state.load_bytes("ventas.csv", csv.as_bytes()).unwrap();
        state.view()
    }

    #[test]
    fn test_json_uses_camel_case() {
        let mut out = Vec::new();
        write_json(&view(), &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["kpis"]["validSales"], 1);
        assert_eq!(json["kpis"]["totalRevenue"], 1234567.0);
        assert_eq!(json["topProducts"][0]["sku"], "A");
        assert_eq!(json["filterOptions"]["years"][0], 2023);
    }

    #[test]
    fn test_export_tables_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_tables(&view(), dir.path()).unwrap();
        assert_eq!(written.len(), 4);

        let monthly = std::fs::read_to_string(dir.path().join("monthly.csv")).unwrap();
        let mut lines = monthly.lines();
        assert_eq!(lines.next(), Some("mes;clave;ventas;monto;monto_clp"));
        assert_eq!(lines.next(), Some("01/2023;2023-01;1;1234567;$1.234.567"));

        let status = std::fs::read_to_string(dir.path().join("status.csv")).unwrap();
        assert!(status.contains("Entregado;1"));
        assert!(status.contains("Canceladas;1"));
    }

    #[test]
    fn test_titles_with_separator_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        export_tables(&view(), dir.path()).unwrap();
        let products = std::fs::read_to_string(dir.path().join("top_products.csv")).unwrap();
        assert!(products.contains("A;\"Polera; talla M\";1;1234567;$1.234.567"));
    }
}
