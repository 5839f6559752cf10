//! Lector de archivos planos de ventas
//!
//! El archivo no trae encabezado: cada línea tiene exactamente 20 campos
//! separados por coma, en el orden de `SALE_COLUMNS`. Las líneas que no se
//! pueden decodificar o que tienen otra cantidad de campos se descartan sin
//! detener la lectura.

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::io::Read;
use tracing::debug;

use crate::dto::SaleRow;

/// Nombres de columna, en orden posicional
pub const SALE_COLUMNS: [&str; 20] = [
    "documento",
    "nombres",
    "apellidos",
    "email",
    "direccion",
    "fecha_nacimiento",
    "genero",
    "celular",
    "motor",
    "modelo_id",
    "cilindraje",
    "color",
    "fecha_ensamble",
    "anio_modelo",
    "factura_num",
    "precio",
    "fecha",
    "ciudad",
    "tienda",
    "vendedor",
];

/// Fila leída junto con su número de línea en el archivo (base 1)
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub line: u64,
    pub row: SaleRow,
}

/// Iterador perezoso de filas válidas
pub struct SaleRowReader<R: Read> {
    records: StringRecordsIntoIter<R>,
    headers: StringRecord,
    skipped: usize,
}

impl<R: Read> SaleRowReader<R> {
    pub fn new(reader: R) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(b',')
            .from_reader(reader)
            .into_records();

        Self {
            records,
            headers: StringRecord::from(SALE_COLUMNS.to_vec()),
            skipped: 0,
        }
    }

    /// Líneas descartadas hasta el momento
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: Read> Iterator for SaleRowReader<R> {
    type Item = ParsedRow;

    fn next(&mut self) -> Option<ParsedRow> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => {
                    debug!("⏭️ Línea ilegible descartada: {}", e);
                    self.skipped += 1;
                    continue;
                }
            };

            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() != SALE_COLUMNS.len() {
                debug!(
                    "⏭️ Línea {} descartada: {} campos (se esperaban {})",
                    line,
                    record.len(),
                    SALE_COLUMNS.len()
                );
                self.skipped += 1;
                continue;
            }

            match record.deserialize::<SaleRow>(Some(&self.headers)) {
                Ok(row) => return Some(ParsedRow { line, row }),
                Err(e) => {
                    debug!("⏭️ Línea {} descartada: {}", line, e);
                    self.skipped += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_LINE: &str = "1020304050,Ana,Gómez,ana@example.com,Calle 1,1990-05-17,F,3001234567,MTR-1,1,689,Azul,2024-01-10,2024,F-001,38500000,2024-02-01,Medellín,Centro,Carlos";

    #[test]
    fn test_assigns_fixed_column_names() {
        let rows: Vec<ParsedRow> = SaleRowReader::new(VALID_LINE.as_bytes()).collect();

        assert_eq!(rows.len(), 1);
        let row = &rows[0].row;
        assert_eq!(rows[0].line, 1);
        assert_eq!(row.documento, "1020304050");
        assert_eq!(row.motor, "MTR-1");
        assert_eq!(row.factura_num, "F-001");
        assert_eq!(row.precio, "38500000");
        assert_eq!(row.vendedor, "Carlos");
    }

    #[test]
    fn test_first_line_is_data_not_header() {
        let data = format!("{}\n{}", VALID_LINE, VALID_LINE.replace("F-001", "F-002"));
        let rows: Vec<ParsedRow> = SaleRowReader::new(data.as_bytes()).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].row.factura_num, "F-002");
        assert_eq!(rows[1].line, 2);
    }

    #[test]
    fn test_skips_lines_with_wrong_field_count() {
        let data = format!(
            "{}\nsolo,tres,campos\n{},extra\n{}",
            VALID_LINE,
            VALID_LINE,
            VALID_LINE.replace("F-001", "F-004")
        );
        let mut reader = SaleRowReader::new(data.as_bytes());
        let rows: Vec<ParsedRow> = reader.by_ref().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[1].line, 4);
        assert_eq!(reader.skipped(), 2);
    }

    #[test]
    fn test_skips_undecodable_lines() {
        let mut data = VALID_LINE.as_bytes().to_vec();
        data.extend_from_slice(b"\n\xff\xfe,");
        data.extend_from_slice(&[b','; 18]);
        data.push(b'\n');
        data.extend_from_slice(VALID_LINE.replace("F-001", "F-003").as_bytes());

        let rows: Vec<ParsedRow> = SaleRowReader::new(data.as_slice()).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].row.factura_num, "F-003");
    }

    #[test]
    fn test_quoted_commas_stay_in_one_field() {
        let line = VALID_LINE.replace("Calle 1", "\"Calle 1, Apto 2\"");
        let rows: Vec<ParsedRow> = SaleRowReader::new(line.as_bytes()).collect();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row.direccion, "Calle 1, Apto 2");
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let mut reader = SaleRowReader::new("\n\n".as_bytes());
        assert!(reader.next().is_none());
        assert_eq!(reader.skipped(), 0);
    }

    #[test]
    fn test_blank_fields_are_kept_as_empty_strings() {
        let line = ",,,,,,,,,,,,,,,,,,,";
        let rows: Vec<ParsedRow> = SaleRowReader::new(line.as_bytes()).collect();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row, SaleRow::default());
    }
}
