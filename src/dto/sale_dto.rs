use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{validate_iso_date, validate_not_empty};

// Request para registrar una venta individual desde el formulario
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSaleRequest {
    #[validate(length(min = 7, max = 20, message = "Cédula debe tener entre 7 y 20 caracteres"))]
    pub documento: String,

    #[validate(length(min = 2, message = "Nombre debe tener al menos 2 caracteres"))]
    pub nombres: String,

    #[validate(length(min = 2, message = "Apellido debe tener al menos 2 caracteres"))]
    pub apellidos: String,

    #[validate(email(message = "Email no es válido"))]
    pub email: String,

    pub direccion: Option<String>,

    #[validate(custom = "validate_iso_date")]
    pub fecha_nacimiento: Option<String>,

    pub genero: Option<String>,

    #[validate(length(min = 7, message = "Celular debe tener al menos 7 caracteres"))]
    pub celular: String,

    #[validate(length(min = 5, message = "Número de motor debe tener al menos 5 caracteres"))]
    pub motor: String,

    #[validate(range(min = 1, message = "Modelo debe ser positivo"))]
    pub modelo_id: i32,

    #[validate(range(min = 1, message = "Cilindraje debe ser positivo"))]
    pub cilindraje: i32,

    #[validate(custom = "validate_not_empty")]
    pub color: String,

    #[validate(custom = "validate_iso_date")]
    pub fecha_ensamble: String,

    #[validate(range(min = 1900, message = "Año de modelo no puede ser anterior a 1900"))]
    pub anio_modelo: i32,

    #[validate(custom = "validate_not_empty")]
    pub factura_num: String,

    #[validate(range(min = 0.01, message = "Precio debe ser mayor a 0"))]
    pub precio: f64,

    #[validate(custom = "validate_iso_date")]
    pub fecha: String,

    #[validate(custom = "validate_not_empty")]
    pub ciudad: String,

    #[validate(custom = "validate_not_empty")]
    pub tienda: String,

    #[validate(custom = "validate_not_empty")]
    pub vendedor: String,
}

// Response de venta creada
#[derive(Debug, Clone, Serialize)]
pub struct CreatedSale {
    pub venta_id: i32,
    pub cliente_id: i32,
    pub vehiculo_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateSaleRequest {
        CreateSaleRequest {
            documento: "1020304050".to_string(),
            nombres: "Ana María".to_string(),
            apellidos: "Gómez".to_string(),
            email: "ana@example.com".to_string(),
            direccion: Some("Calle 10 # 5-20".to_string()),
            fecha_nacimiento: Some("1990-05-17".to_string()),
            genero: Some("F".to_string()),
            celular: "3001234567".to_string(),
            motor: "MTR-000123".to_string(),
            modelo_id: 1,
            cilindraje: 689,
            color: "Azul".to_string(),
            fecha_ensamble: "2024-01-10".to_string(),
            anio_modelo: 2024,
            factura_num: "F-2024-0001".to_string(),
            precio: 38_500_000.0,
            fecha: "2024-02-01".to_string(),
            ciudad: "Medellín".to_string(),
            tienda: "Centro".to_string(),
            vendedor: "Carlos Ruiz".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_invalid_fields_are_reported() {
        let mut request = valid_request();
        request.documento = "123".to_string();
        request.email = "sin-arroba".to_string();
        request.precio = 0.0;
        request.fecha = "01-02-2024".to_string();
        request.vendedor = "   ".to_string();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("documento"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("precio"));
        assert!(fields.contains_key("fecha"));
        assert!(fields.contains_key("vendedor"));
        assert!(!fields.contains_key("nombres"));
    }

    #[test]
    fn test_optional_birth_date_is_checked_only_when_present() {
        let mut request = valid_request();
        request.fecha_nacimiento = None;
        assert!(request.validate().is_ok());

        request.fecha_nacimiento = Some("17/05/1990".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_deserializes_form_payload() {
        let payload = serde_json::json!({
            "documento": "1020304050", "nombres": "Ana", "apellidos": "Gómez",
            "email": "ana@example.com", "celular": "3001234567",
            "motor": "MTR-000123", "modelo_id": 2, "cilindraje": 321, "color": "Negro",
            "fecha_ensamble": "2024-01-10", "anio_modelo": 2024,
            "factura_num": "F-9", "precio": 25990000.5, "fecha": "2024-02-01",
            "ciudad": "Cali", "tienda": "Norte", "vendedor": "Luis"
        });
        let request: CreateSaleRequest = serde_json::from_value(payload).unwrap();
        assert_eq!(request.modelo_id, 2);
        assert!(request.direccion.is_none());
        assert!(request.validate().is_ok());
    }
}
