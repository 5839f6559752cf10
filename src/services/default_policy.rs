//! Política de valores por defecto para campos opcionales
//!
//! Cada campo opcional del archivo plano tiene un valor por defecto declarado
//! en `DefaultedField::default_value`. La política resuelve esos valores con
//! la fecha de referencia del lote y el primer modelo del catálogo, ambos
//! inyectados para que el contrato sea verificable sin reloj ni base.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::utils::validation::{non_blank, parse_date};

/// Texto usado cuando un campo descriptivo llega vacío
pub const UNSPECIFIED: &str = "Sin especificar";

/// Campos del archivo que admiten un valor por defecto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultedField {
    ModeloId,
    Cilindraje,
    Color,
    FechaEnsamble,
    AnioModelo,
    Fecha,
    Ciudad,
    Tienda,
    Vendedor,
    Precio,
    FechaNacimiento,
    Genero,
}

/// Valor por defecto declarado para un campo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// Primera entrada del catálogo de modelos
    FirstCatalogModel,
    Integer(i32),
    Text(&'static str),
    /// Fecha de referencia del lote
    Today,
    /// Año de la fecha de referencia
    CurrentYear,
    Null,
}

impl DefaultedField {
    pub const ALL: [DefaultedField; 12] = [
        DefaultedField::ModeloId,
        DefaultedField::Cilindraje,
        DefaultedField::Color,
        DefaultedField::FechaEnsamble,
        DefaultedField::AnioModelo,
        DefaultedField::Fecha,
        DefaultedField::Ciudad,
        DefaultedField::Tienda,
        DefaultedField::Vendedor,
        DefaultedField::Precio,
        DefaultedField::FechaNacimiento,
        DefaultedField::Genero,
    ];

    pub fn default_value(self) -> DefaultValue {
        match self {
            DefaultedField::ModeloId => DefaultValue::FirstCatalogModel,
            DefaultedField::Cilindraje => DefaultValue::Integer(0),
            DefaultedField::Color => DefaultValue::Text(UNSPECIFIED),
            DefaultedField::FechaEnsamble => DefaultValue::Today,
            DefaultedField::AnioModelo => DefaultValue::CurrentYear,
            DefaultedField::Fecha => DefaultValue::Today,
            DefaultedField::Ciudad => DefaultValue::Text(UNSPECIFIED),
            DefaultedField::Tienda => DefaultValue::Text(UNSPECIFIED),
            DefaultedField::Vendedor => DefaultValue::Text(UNSPECIFIED),
            DefaultedField::Precio => DefaultValue::Integer(0),
            DefaultedField::FechaNacimiento => DefaultValue::Null,
            DefaultedField::Genero => DefaultValue::Null,
        }
    }

    /// Nombre de la columna en el archivo
    pub fn column(self) -> &'static str {
        match self {
            DefaultedField::ModeloId => "modelo_id",
            DefaultedField::Cilindraje => "cilindraje",
            DefaultedField::Color => "color",
            DefaultedField::FechaEnsamble => "fecha_ensamble",
            DefaultedField::AnioModelo => "anio_modelo",
            DefaultedField::Fecha => "fecha",
            DefaultedField::Ciudad => "ciudad",
            DefaultedField::Tienda => "tienda",
            DefaultedField::Vendedor => "vendedor",
            DefaultedField::Precio => "precio",
            DefaultedField::FechaNacimiento => "fecha_nacimiento",
            DefaultedField::Genero => "genero",
        }
    }
}

/// Error al convertir un campo no vacío
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDate {
    pub field: &'static str,
    pub value: String,
}

/// Resolución de valores por defecto para un lote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultPolicy {
    today: NaiveDate,
    first_model_id: i32,
}

impl DefaultPolicy {
    pub fn new(today: NaiveDate, first_model_id: i32) -> Self {
        Self {
            today,
            first_model_id,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn default_integer(&self, field: DefaultedField) -> i32 {
        match field.default_value() {
            DefaultValue::FirstCatalogModel => self.first_model_id,
            DefaultValue::Integer(n) => n,
            DefaultValue::CurrentYear => self.today.year(),
            _ => 0,
        }
    }

    fn default_text(&self, field: DefaultedField) -> Option<String> {
        match field.default_value() {
            DefaultValue::Text(text) => Some(text.to_string()),
            _ => None,
        }
    }

    fn default_date(&self, field: DefaultedField) -> Option<NaiveDate> {
        match field.default_value() {
            DefaultValue::Today => Some(self.today),
            _ => None,
        }
    }

    /// Texto recortado, o el texto por defecto del campo si llega vacío
    pub fn text(&self, field: DefaultedField, raw: &str) -> String {
        match non_blank(raw) {
            Some(value) => value.to_string(),
            None => self.default_text(field).unwrap_or_default(),
        }
    }

    /// Texto recortado, o `None` si llega vacío y el campo admite nulo
    pub fn optional_text(&self, field: DefaultedField, raw: &str) -> Option<String> {
        non_blank(raw)
            .map(str::to_string)
            .or_else(|| self.default_text(field))
    }

    /// Entero tomado de los dígitos iniciales (`689cc` es 689); vacío, no
    /// numérico o cero cae al valor por defecto
    pub fn integer(&self, field: DefaultedField, raw: &str) -> i32 {
        non_blank(raw)
            .and_then(parse_leading_integer)
            .filter(|value| *value != 0)
            .unwrap_or_else(|| self.default_integer(field))
    }

    /// Decimal; vacío o no numérico cae al valor por defecto
    pub fn decimal(&self, field: DefaultedField, raw: &str) -> Decimal {
        non_blank(raw)
            .and_then(parse_decimal)
            .unwrap_or_else(|| Decimal::from(self.default_integer(field)))
    }

    /// Fecha obligatoria en base: vacía cae al valor por defecto, ilegible es error
    pub fn date(&self, field: DefaultedField, raw: &str) -> Result<NaiveDate, InvalidDate> {
        match self.optional_date(field, raw)? {
            Some(date) => Ok(date),
            None => Ok(self.today),
        }
    }

    /// Fecha opcional: vacía cae al valor por defecto (posiblemente nulo)
    pub fn optional_date(
        &self,
        field: DefaultedField,
        raw: &str,
    ) -> Result<Option<NaiveDate>, InvalidDate> {
        match non_blank(raw) {
            None => Ok(self.default_date(field)),
            Some(value) => parse_date(value).map(Some).ok_or_else(|| InvalidDate {
                field: field.column(),
                value: value.to_string(),
            }),
        }
    }
}

/// Lee el signo y los dígitos del inicio e ignora el resto
pub fn parse_leading_integer(value: &str) -> Option<i32> {
    let value = value.trim_start();
    let sign_len = usize::from(value.starts_with(&['+', '-'][..]));
    let digits = value[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    value[..sign_len + digits].parse().ok()
}

/// Interpreta un número decimal (`1234.5`, `1e3`)
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    Decimal::from_str(value)
        .ok()
        .or_else(|| Decimal::from_scientific(value).ok())
}
