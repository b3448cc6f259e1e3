//! Test fixtures for dashboard integration tests

use serde_json::{Value, json};

pub const TEST_USERS: &str = "admin:password123,juan.duran:imsa2025";

/// One product per stock state, in the data source's field names
pub fn create_test_upstream_products() -> Value {
    json!([
        {
            "CodigoDeArticulo": "ABC123",
            "DescripcionArticulo": "Cable de cobre desnudo",
            "StockProducto": 0,
            "StockSeguridad": 5,
            "PuntoDeReOrden": 10,
            "DespachosPendientes": 2,
            "UltimaNE_C_Cables": "2025-03-01T10:00:00.000Z",
            "EstadoStock": "Critico"
        },
        {
            "CodigoDeArticulo": "DEF456",
            "DescripcionArticulo": "Conector ABC reforzado",
            "StockProducto": 3,
            "StockSeguridad": 5,
            "PuntoDeReOrden": 10,
            "DespachosPendientes": 0,
            "EstadoStock": "Precaucion"
        },
        {
            "CodigoDeArticulo": "XYZ999",
            "DescripcionArticulo": "Terminal estandar",
            "StockProducto": 12,
            "StockSeguridad": 5,
            "PuntoDeReOrden": 10,
            "DespachosPendientes": 6,
            "UltimaNE_C_Cables": "2025-05-15T08:30:00.000Z",
            "EstadoStock": "Dentro del rango"
        },
        {
            "CodigoDeArticulo": "OTHER1",
            "DescripcionArticulo": "other",
            "StockProducto": 25,
            "StockSeguridad": 5,
            "PuntoDeReOrden": 10,
            "DespachosPendientes": 0,
            "EstadoStock": "Sobre Produccion"
        }
    ])
}

/// The same products wrapped in the success envelope
pub fn create_test_envelope() -> Value {
    json!({
        "success": true,
        "data": create_test_upstream_products(),
        "total": 4,
        "timestamp": "2025-06-01T12:00:00.000Z"
    })
}

/// Products in canonical field names covering every classification branch
pub fn create_test_canonical_products() -> Value {
    json!([
        { "code": "ABC123", "description": "Critical item", "currentStock": 0, "safetyStock": 5, "reorderPoint": 10 },
        { "code": "C2", "description": "Caution item", "currentStock": 3, "safetyStock": 5, "reorderPoint": 10 },
        { "code": "N3", "description": "Normal item", "currentStock": 12, "safetyStock": 5, "reorderPoint": 10 },
        { "code": "O4", "description": "Overstock item", "currentStock": 25, "safetyStock": 5, "reorderPoint": 10 }
    ])
}
