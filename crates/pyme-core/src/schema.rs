//! Request schemas for the payloads the ERP forms submit.
//!
//! Each request type mirrors the JSON a form sends (camelCase keys, unknown
//! keys rejected). Calling `validate()` consumes the request and yields a
//! draft whose fields are trimmed, defaulted, and typed (`Rut`, `Region`,
//! `Unit`), or the first field-level [`Error::Validation`].
//!
//! # Example
//!
//! ```rust
//! use pyme_core::schema::{from_json, NewClient};
//!
//! let request: NewClient = from_json(r#"{
//!     "name": "Comercial Andes Ltda.",
//!     "rut": "76086428-5",
//!     "address": "Av. Providencia 1234",
//!     "city": "Santiago",
//!     "region": "Región Metropolitana"
//! }"#).unwrap();
//!
//! let client = request.validate().unwrap();
//! assert_eq!(client.rut.to_string(), "76.086.428-5");
//! assert_eq!(client.payment_terms, 30);
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::{Region, Unit};
use crate::error::{Error, Result};
use crate::rut::Rut;

/// Payment terms (days) for clients that do not specify any.
pub const DEFAULT_PAYMENT_TERMS: u32 = 30;

/// VAT (IVA) rate, in percent, for products that do not specify one.
pub const DEFAULT_TAX_RATE: u8 = 19;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

const MSG_REQUIRED: &str = "Los campos marcados con * son obligatorios";
const MSG_INVALID_RUT: &str = "El RUT ingresado no es válido";
const MSG_INVALID_EMAIL: &str = "El email ingresado no es válido";

/// Deserialize a request from JSON.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

// ============================================================================
// Field helpers
// ============================================================================

fn required(field: &str, value: String, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation_field(field, message));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn rut_field(field: &str, value: &str, message: &str) -> Result<Rut> {
    value
        .parse()
        .map_err(|_| Error::validation_field(field, message))
}

fn email_field(field: &str, value: String) -> Result<String> {
    let email = value.trim().to_lowercase();
    if is_plausible_email(&email) {
        Ok(email)
    } else {
        Err(Error::validation_field(field, MSG_INVALID_EMAIL))
    }
}

/// One `@`, a non-empty local part, and a dotted domain.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

// ============================================================================
// Registration
// ============================================================================

/// Sign-up form payload.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterUser {
    /// Login email
    pub email: String,
    /// Plain password as typed
    pub password: String,
    /// Password confirmation, checked when present
    #[serde(default)]
    pub confirm_password: Option<String>,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Company the user is registering for
    #[serde(default)]
    pub company_name: Option<String>,
    /// Company RUT, validated when present
    #[serde(default)]
    pub company_rut: Option<String>,
}

/// A validated sign-up.
#[derive(Clone)]
pub struct Registration {
    /// Lowercased email
    pub email: String,
    /// Plain password; hash before storing
    pub password: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Company name, if given
    pub company_name: Option<String>,
    /// Company RUT, if given
    pub company_rut: Option<Rut>,
}

impl RegisterUser {
    /// Validate the sign-up payload.
    pub fn validate(self) -> Result<Registration> {
        let first_name = required("firstName", self.first_name, MSG_REQUIRED)?;
        let last_name = required("lastName", self.last_name, MSG_REQUIRED)?;
        let email = required("email", self.email, MSG_REQUIRED)?;
        let email = email_field("email", email)?;

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation_field(
                "password",
                format!("La contraseña debe tener al menos {MIN_PASSWORD_LEN} caracteres"),
            ));
        }
        if let Some(confirm) = &self.confirm_password
            && *confirm != self.password
        {
            return Err(Error::validation_field(
                "confirmPassword",
                "Las contraseñas no coinciden",
            ));
        }

        let company_rut = optional(self.company_rut)
            .map(|rut| rut_field("companyRut", &rut, "RUT de empresa inválido"))
            .transpose()?;

        Ok(Registration {
            email,
            password: self.password,
            first_name,
            last_name,
            company_name: optional(self.company_name),
            company_rut,
        })
    }
}

impl Registration {
    /// Full display name, "first last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUser")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("company_name", &self.company_name)
            .field("company_rut", &self.company_rut)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("company_name", &self.company_name)
            .field("company_rut", &self.company_rut)
            .finish()
    }
}

// ============================================================================
// Clients
// ============================================================================

/// New-client form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[allow(missing_docs)]
pub struct NewClient {
    pub name: String,
    pub rut: String,
    #[serde(default)]
    pub giro: Option<String>,
    pub address: String,
    pub city: String,
    pub region: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Days until payment is due
    #[serde(default)]
    pub payment_terms: Option<u32>,
    /// Credit limit, in pesos
    #[serde(default)]
    pub credit_limit: Option<i64>,
}

/// A validated client, ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ClientDraft {
    pub name: String,
    pub rut: Rut,
    pub giro: Option<String>,
    pub address: String,
    pub city: String,
    pub region: Region,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub payment_terms: u32,
    pub credit_limit: i64,
}

impl NewClient {
    /// Validate the client payload.
    pub fn validate(self) -> Result<ClientDraft> {
        let name = required("name", self.name, MSG_REQUIRED)?;
        let rut = required("rut", self.rut, MSG_REQUIRED)?;
        let address = required("address", self.address, MSG_REQUIRED)?;
        let city = required("city", self.city, MSG_REQUIRED)?;
        let region = required("region", self.region, MSG_REQUIRED)?;

        let rut = rut_field("rut", &rut, MSG_INVALID_RUT)?;
        let region = region
            .parse::<Region>()
            .map_err(|_| Error::validation_field("region", "La región seleccionada no es válida"))?;

        let email = optional(self.email)
            .map(|email| email_field("email", email))
            .transpose()?;
        let contact_email = optional(self.contact_email)
            .map(|email| email_field("contactEmail", email))
            .transpose()?;

        let credit_limit = self.credit_limit.unwrap_or(0);
        if credit_limit < 0 {
            return Err(Error::validation_field(
                "creditLimit",
                "El límite de crédito no puede ser negativo",
            ));
        }

        Ok(ClientDraft {
            name,
            rut,
            giro: optional(self.giro),
            address,
            city,
            region,
            phone: optional(self.phone),
            email,
            contact_name: optional(self.contact_name),
            contact_phone: optional(self.contact_phone),
            contact_email,
            payment_terms: self.payment_terms.unwrap_or(DEFAULT_PAYMENT_TERMS),
            credit_limit,
        })
    }
}

// ============================================================================
// Suppliers
// ============================================================================

/// New-supplier form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[allow(missing_docs)]
pub struct NewSupplier {
    pub name: String,
    pub rut: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A validated supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SupplierDraft {
    pub name: String,
    pub rut: Rut,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
}

impl NewSupplier {
    /// Validate the supplier payload.
    pub fn validate(self) -> Result<SupplierDraft> {
        const MSG: &str = "Nombre, RUT y email son obligatorios";
        let name = required("name", self.name, MSG)?;
        let rut = required("rut", self.rut, MSG)?;
        let email = required("email", self.email, MSG)?;

        Ok(SupplierDraft {
            name,
            rut: rut_field("rut", &rut, MSG_INVALID_RUT)?,
            email: email_field("email", email)?,
            phone: optional(self.phone),
            address: optional(self.address),
            city: optional(self.city),
            contact_person: optional(self.contact_person),
            notes: optional(self.notes),
        })
    }
}

// ============================================================================
// Products
// ============================================================================

/// Kind of inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    /// Stock received
    In,
    /// Stock shipped or consumed
    Out,
    /// Manual correction
    Adjustment,
    /// Moved between locations
    Transfer,
}

/// A stock movement recorded against a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    /// Direction of the movement
    #[serde(rename = "type")]
    pub kind: MovementType,
    /// Units moved
    pub quantity: i64,
    /// Free-text reason
    pub reason: String,
    /// Stock level once the movement is applied
    pub stock_after: i64,
}

/// New-product form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[allow(missing_docs)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Sale price, in pesos
    pub price: i64,
    #[serde(default)]
    pub cost: Option<i64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub min_stock: Option<i64>,
    #[serde(default)]
    pub max_stock: Option<i64>,
    #[serde(default)]
    pub unit: Option<Unit>,
    /// VAT rate in percent
    #[serde(default)]
    pub tax_rate: Option<u8>,
}

/// A validated product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub cost: i64,
    pub stock: i64,
    pub min_stock: i64,
    pub max_stock: Option<i64>,
    pub unit: Unit,
    pub tax_rate: u8,
}

impl NewProduct {
    /// Validate the product payload.
    pub fn validate(self) -> Result<ProductDraft> {
        const MSG: &str = "Los campos código, nombre y precio son obligatorios";
        let code = required("code", self.code, MSG)?;
        let name = required("name", self.name, MSG)?;
        if self.price <= 0 {
            return Err(Error::validation_field("price", MSG));
        }

        let cost = self.cost.unwrap_or(0);
        let stock = self.stock.unwrap_or(0);
        let min_stock = self.min_stock.unwrap_or(0);
        for (field, value) in [("cost", cost), ("stock", stock), ("minStock", min_stock)] {
            if value < 0 {
                return Err(Error::validation_field(
                    field,
                    "Los valores de costo y stock no pueden ser negativos",
                ));
            }
        }
        if let Some(max) = self.max_stock
            && max < min_stock
        {
            return Err(Error::validation_field(
                "maxStock",
                "El stock máximo no puede ser menor al stock mínimo",
            ));
        }

        let tax_rate = self.tax_rate.unwrap_or(DEFAULT_TAX_RATE);
        if tax_rate > 100 {
            return Err(Error::validation_field(
                "taxRate",
                "La tasa de impuesto debe estar entre 0 y 100",
            ));
        }

        Ok(ProductDraft {
            code,
            name,
            description: optional(self.description),
            price: self.price,
            cost,
            stock,
            min_stock,
            max_stock: self.max_stock,
            unit: self.unit.unwrap_or_default(),
            tax_rate,
        })
    }
}

impl ProductDraft {
    /// The movement that records opening stock, if there is any.
    pub fn initial_movement(&self) -> Option<StockMovement> {
        (self.stock > 0).then(|| StockMovement {
            kind: MovementType::In,
            quantity: self.stock,
            reason: "Stock inicial".to_string(),
            stock_after: self.stock,
        })
    }

    /// Whether stock is at or below the reorder point.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

// ============================================================================
// Invoices
// ============================================================================

/// Kind of tax document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceType {
    /// Factura electrónica
    Factura,
    /// Boleta (consumer receipt)
    Boleta,
    /// Credit note
    NotaCredito,
    /// Debit note
    NotaDebito,
    /// VAT-exempt invoice
    FacturaExenta,
}

/// Lifecycle of a tax document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    /// Not yet issued
    #[default]
    Draft,
    /// Sent to the client
    Sent,
    /// Accepted by the tax authority
    Accepted,
    /// Rejected by the tax authority
    Rejected,
    /// Voided
    Canceled,
    /// Paid in full
    Paid,
}

// ============================================================================
// Quotes and purchase orders
// ============================================================================

/// Number prefix of quotes (`COT-001`).
pub const QUOTE_PREFIX: &str = "COT";

/// Number prefix of purchase orders (`OC-001`).
pub const PURCHASE_PREFIX: &str = "OC";

/// Document number from a prefix and a sequence, zero-padded to three
/// digits.
///
/// ```
/// use pyme_core::schema::{document_number, QUOTE_PREFIX};
///
/// assert_eq!(document_number(QUOTE_PREFIX, 7), "COT-007");
/// assert_eq!(document_number("OC", 1234), "OC-1234");
/// ```
pub fn document_number(prefix: &str, sequence: u32) -> String {
    format!("{prefix}-{sequence:03}")
}

/// Status of a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Approved,
    Rejected,
    Expired,
}

/// Status of a purchase order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum PurchaseStatus {
    #[default]
    Draft,
    Sent,
    Received,
    Canceled,
}

/// One line of a quote or purchase order, as the form sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[allow(missing_docs)]
pub struct NewLineItem {
    pub product_id: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: i64,
    /// Unit price, in pesos
    pub unit_price: i64,
    /// `quantity * unit_price`, as computed by the form
    pub total: i64,
}

/// A validated line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct LineItem {
    pub product_id: String,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub quantity: i64,
    pub unit_price: i64,
    pub total: i64,
}

/// Validate the items of a document against its declared total.
///
/// Returns the items and their sum. Field names in errors are indexed,
/// e.g. `items[1].total`.
fn line_items(items: Vec<NewLineItem>, total_amount: i64) -> Result<(Vec<LineItem>, i64)> {
    if items.is_empty() {
        return Err(Error::validation_field(
            "items",
            "Debe agregar al menos un ítem",
        ));
    }

    let mut sum: i64 = 0;
    let mut validated = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let field = |name: &str| format!("items[{i}].{name}");

        let product_id = required(&field("productId"), item.product_id, MSG_REQUIRED)?;
        if item.quantity <= 0 {
            return Err(Error::validation_field(
                field("quantity"),
                "La cantidad debe ser mayor a cero",
            ));
        }
        if item.unit_price < 0 {
            return Err(Error::validation_field(
                field("unitPrice"),
                "El precio unitario no puede ser negativo",
            ));
        }
        if item.quantity.checked_mul(item.unit_price) != Some(item.total) {
            return Err(Error::validation_field(
                field("total"),
                "El total del ítem no coincide con cantidad por precio unitario",
            ));
        }
        sum = sum.checked_add(item.total).ok_or_else(|| {
            Error::validation_field("totalAmount", "El monto total es demasiado grande")
        })?;

        validated.push(LineItem {
            product_id,
            product_name: optional(item.product_name),
            description: optional(item.description),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total: item.total,
        });
    }

    if sum != total_amount {
        return Err(Error::validation_field(
            "totalAmount",
            "El monto total no coincide con la suma de los ítems",
        ));
    }
    Ok((validated, sum))
}

/// Accepts a plain date (`2025-03-31`) or an RFC 3339 timestamp, as sent
/// by date inputs and by `toISOString()` respectively.
fn date_field(field: &str, value: &str, message: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| Error::validation_field(field, message))
}

/// New-quote form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[allow(missing_docs)]
pub struct NewQuote {
    pub client_id: String,
    #[serde(default)]
    pub client_name: Option<String>,
    pub valid_until: String,
    pub items: Vec<NewLineItem>,
    /// Sum of the item totals, in pesos
    pub total_amount: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
}

/// A validated quote, created as a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct QuoteDraft {
    pub client_id: String,
    pub client_name: Option<String>,
    pub valid_until: NaiveDate,
    pub status: QuoteStatus,
    pub items: Vec<LineItem>,
    pub total_amount: i64,
    pub notes: Option<String>,
    pub terms: Option<String>,
}

impl NewQuote {
    /// Validate the quote payload.
    pub fn validate(self) -> Result<QuoteDraft> {
        let client_id = required("clientId", self.client_id, "Debe seleccionar un cliente")?;
        let valid_until = date_field(
            "validUntil",
            &self.valid_until,
            "La fecha de validez no es válida",
        )?;
        let (items, total_amount) = line_items(self.items, self.total_amount)?;

        Ok(QuoteDraft {
            client_id,
            client_name: optional(self.client_name),
            valid_until,
            status: QuoteStatus::Draft,
            items,
            total_amount,
            notes: optional(self.notes),
            terms: optional(self.terms),
        })
    }
}

/// New-purchase-order form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[allow(missing_docs)]
pub struct NewPurchase {
    pub supplier_id: String,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub delivery_date: Option<String>,
    pub items: Vec<NewLineItem>,
    /// Sum of the item totals, in pesos
    pub total_amount: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A validated purchase order, created as a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PurchaseDraft {
    pub supplier_id: String,
    pub supplier_name: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub status: PurchaseStatus,
    pub items: Vec<LineItem>,
    pub total_amount: i64,
    pub notes: Option<String>,
}

impl NewPurchase {
    /// Validate the purchase-order payload.
    pub fn validate(self) -> Result<PurchaseDraft> {
        let supplier_id = required(
            "supplierId",
            self.supplier_id,
            "Debe seleccionar un proveedor",
        )?;
        let delivery_date = optional(self.delivery_date)
            .map(|date| {
                date_field(
                    "deliveryDate",
                    &date,
                    "La fecha de entrega no es válida",
                )
            })
            .transpose()?;
        let (items, total_amount) = line_items(self.items, self.total_amount)?;

        Ok(PurchaseDraft {
            supplier_id,
            supplier_name: optional(self.supplier_name),
            delivery_date,
            status: PurchaseStatus::Draft,
            items,
            total_amount,
            notes: optional(self.notes),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> NewClient {
        NewClient {
            name: "Comercial Andes Ltda.".to_string(),
            rut: "76.086.428-5".to_string(),
            address: "Av. Providencia 1234".to_string(),
            city: "Santiago".to_string(),
            region: "Región Metropolitana".to_string(),
            ..Default::default()
        }
    }

    fn registration() -> RegisterUser {
        RegisterUser {
            email: " Admin@Test.com ".to_string(),
            password: "123456".to_string(),
            confirm_password: None,
            first_name: "Admin".to_string(),
            last_name: "Usuario".to_string(),
            company_name: None,
            company_rut: None,
        }
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    #[test]
    fn test_registration_normalizes_email() {
        let reg = registration().validate().unwrap();
        assert_eq!(reg.email, "admin@test.com");
        assert_eq!(reg.full_name(), "Admin Usuario");
    }

    #[test]
    fn test_registration_rejects_short_password() {
        let mut req = registration();
        req.password = "12345".to_string();
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("password"));
    }

    #[test]
    fn test_registration_rejects_mismatched_confirmation() {
        let mut req = registration();
        req.confirm_password = Some("654321".to_string());
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("confirmPassword"));
        assert!(err.to_string().contains("no coinciden"));
    }

    #[test]
    fn test_registration_company_rut() {
        let mut req = registration();
        req.company_rut = Some("76086428-5".to_string());
        let reg = req.validate().unwrap();
        assert_eq!(reg.company_rut.unwrap().body(), 76_086_428);

        let mut req = registration();
        req.company_rut = Some("76086428-4".to_string());
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("companyRut"));

        let mut req = registration();
        req.company_rut = Some("  ".to_string());
        assert!(req.validate().unwrap().company_rut.is_none());
    }

    #[test]
    fn test_registration_rejects_bad_email() {
        for email in ["admin", "@test.com", "admin@test", "a@b@c.cl", "ad min@test.cl", "a@.cl"] {
            let mut req = registration();
            req.email = email.to_string();
            let err = req.validate().unwrap_err();
            assert_eq!(err.field(), Some("email"), "{email}");
        }
    }

    #[test]
    fn test_registration_debug_redacts_password() {
        let req = registration();
        let debug = format!("{req:?}");
        assert!(!debug.contains("123456"));
        assert!(debug.contains("<redacted>"));
        let debug = format!("{:?}", req.validate().unwrap());
        assert!(!debug.contains("123456"));
    }

    #[test]
    fn test_registration_from_json() {
        let req: RegisterUser = from_json(
            r#"{"email":"a@b.cl","password":"secreto","confirmPassword":"secreto","firstName":"Ana","lastName":"Rojas"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    // -------------------------------------------------------------------------
    // Clients
    // -------------------------------------------------------------------------

    #[test]
    fn test_client_defaults() {
        let draft = client().validate().unwrap();
        assert_eq!(draft.payment_terms, DEFAULT_PAYMENT_TERMS);
        assert_eq!(draft.credit_limit, 0);
        assert_eq!(draft.region, Region::Metropolitana);
        assert!(draft.giro.is_none());
    }

    #[test]
    fn test_client_missing_required_field() {
        let mut req = client();
        req.city = "   ".to_string();
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("city"));
        assert!(err.to_string().contains("obligatorios"));
    }

    #[test]
    fn test_client_invalid_rut() {
        let mut req = client();
        req.rut = "76.086.428-4".to_string();
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("rut"));
        assert!(err.to_string().contains("El RUT ingresado no es válido"));
    }

    #[test]
    fn test_client_unknown_region() {
        let mut req = client();
        req.region = "Región de Narnia".to_string();
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("region"));
        assert!(err.to_string().contains("región seleccionada"));
    }

    #[test]
    fn test_client_blank_optionals_become_none() {
        let mut req = client();
        req.phone = Some(String::new());
        req.email = Some("  ".to_string());
        req.giro = Some(" Retail ".to_string());
        let draft = req.validate().unwrap();
        assert!(draft.phone.is_none());
        assert!(draft.email.is_none());
        assert_eq!(draft.giro.as_deref(), Some("Retail"));
    }

    #[test]
    fn test_client_zero_payment_terms_kept() {
        let mut req = client();
        req.payment_terms = Some(0);
        assert_eq!(req.validate().unwrap().payment_terms, 0);
    }

    #[test]
    fn test_client_negative_credit_limit() {
        let mut req = client();
        req.credit_limit = Some(-1);
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("creditLimit"));
    }

    #[test]
    fn test_client_json_rejects_unknown_fields() {
        let err = from_json::<NewClient>(
            r#"{"name":"x","rut":"x","address":"x","city":"x","region":"x","isAdmin":true}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_client_json_missing_required_key() {
        let err = from_json::<NewClient>(r#"{"name":"x"}"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_client_draft_serializes_camel_case() {
        let draft = client().validate().unwrap();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["rut"], "76.086.428-5");
        assert_eq!(json["paymentTerms"], 30);
        assert_eq!(json["region"], "Región Metropolitana");
    }

    // -------------------------------------------------------------------------
    // Suppliers
    // -------------------------------------------------------------------------

    #[test]
    fn test_supplier_required_fields() {
        let err = NewSupplier {
            name: "Proveedor ABC S.A.".to_string(),
            rut: "12.345.678-5".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field(), Some("email"));
        assert!(err.to_string().contains("Nombre, RUT y email son obligatorios"));
    }

    #[test]
    fn test_supplier_valid() {
        let draft = NewSupplier {
            name: "Proveedor ABC S.A.".to_string(),
            rut: "123456785".to_string(),
            email: "contacto@proveedorabc.cl".to_string(),
            notes: Some("Proveedor de confianza".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(draft.rut.to_string(), "12.345.678-5");
        assert!(draft.phone.is_none());
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    fn product() -> NewProduct {
        NewProduct {
            code: "LIC-ERP".to_string(),
            name: "Licencia Software ERP".to_string(),
            price: 150_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_product_defaults() {
        let draft = product().validate().unwrap();
        assert_eq!(draft.unit, Unit::Und);
        assert_eq!(draft.tax_rate, DEFAULT_TAX_RATE);
        assert_eq!(draft.cost, 0);
        assert!(draft.initial_movement().is_none());
        assert!(draft.is_low_stock());
    }

    #[test]
    fn test_product_requires_positive_price() {
        let mut req = product();
        req.price = 0;
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("price"));
    }

    #[test]
    fn test_product_max_below_min() {
        let mut req = product();
        req.min_stock = Some(10);
        req.max_stock = Some(5);
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("maxStock"));
    }

    #[test]
    fn test_product_rejects_negative_stock() {
        let mut req = product();
        req.stock = Some(-3);
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("stock"));
    }

    #[test]
    fn test_product_tax_rate_bounds() {
        let mut req = product();
        req.tax_rate = Some(101);
        assert_eq!(req.validate().unwrap_err().field(), Some("taxRate"));

        let mut req = product();
        req.tax_rate = Some(0);
        assert_eq!(req.validate().unwrap().tax_rate, 0);
    }

    #[test]
    fn test_product_initial_movement() {
        let mut req = product();
        req.stock = Some(25);
        let movement = req.validate().unwrap().initial_movement().unwrap();
        assert_eq!(movement.kind, MovementType::In);
        assert_eq!(movement.quantity, 25);
        assert_eq!(movement.stock_after, 25);
        assert_eq!(movement.reason, "Stock inicial");

        let json = serde_json::to_value(&movement).unwrap();
        assert_eq!(json["type"], "IN");
        assert_eq!(json["stockAfter"], 25);
    }

    #[test]
    fn test_product_unit_from_json() {
        let req: NewProduct =
            from_json(r#"{"code":"A1","name":"Cable","price":990,"unit":"MT"}"#).unwrap();
        assert_eq!(req.validate().unwrap().unit, Unit::Mt);

        assert!(
            from_json::<NewProduct>(r#"{"code":"A1","name":"Cable","price":990,"unit":"XX"}"#)
                .is_err()
        );
    }

    // -------------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------------

    #[test]
    fn test_invoice_enums_wire_names() {
        assert_eq!(
            serde_json::to_string(&InvoiceType::NotaCredito).unwrap(),
            "\"NOTA_CREDITO\""
        );
        assert_eq!(
            serde_json::from_str::<InvoiceType>("\"FACTURA_EXENTA\"").unwrap(),
            InvoiceType::FacturaExenta
        );
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Draft);
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Canceled).unwrap(),
            "\"CANCELED\""
        );
        assert!(serde_json::from_str::<InvoiceStatus>("\"VOID\"").is_err());
    }

    // -------------------------------------------------------------------------
    // Quotes and purchase orders
    // -------------------------------------------------------------------------

    fn item(product_id: &str, quantity: i64, unit_price: i64) -> NewLineItem {
        NewLineItem {
            product_id: product_id.to_string(),
            quantity,
            unit_price,
            total: quantity * unit_price,
            ..Default::default()
        }
    }

    fn quote() -> NewQuote {
        NewQuote {
            client_id: "1".to_string(),
            client_name: Some("Cliente ABC S.A.".to_string()),
            valid_until: "2025-03-31".to_string(),
            items: vec![item("1", 2, 100_000), item("2", 1, 38_000)],
            total_amount: 238_000,
            ..Default::default()
        }
    }

    fn purchase() -> NewPurchase {
        NewPurchase {
            supplier_id: "1".to_string(),
            items: vec![item("1", 10, 15_000)],
            total_amount: 150_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_document_number() {
        assert_eq!(document_number(QUOTE_PREFIX, 1), "COT-001");
        assert_eq!(document_number(PURCHASE_PREFIX, 42), "OC-042");
    }

    #[test]
    fn test_quote_valid() {
        let draft = quote().validate().unwrap();
        assert_eq!(draft.status, QuoteStatus::Draft);
        assert_eq!(draft.total_amount, 238_000);
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.valid_until.to_string(), "2025-03-31");
    }

    #[test]
    fn test_quote_accepts_iso_timestamp() {
        let mut req = quote();
        req.valid_until = "2025-03-31T12:30:00.000Z".to_string();
        let draft = req.validate().unwrap();
        assert_eq!(draft.valid_until.to_string(), "2025-03-31");
    }

    #[test]
    fn test_quote_rejects_bad_date() {
        let mut req = quote();
        req.valid_until = "31/03/2025".to_string();
        assert_eq!(req.validate().unwrap_err().field(), Some("validUntil"));
    }

    #[test]
    fn test_quote_requires_client() {
        let mut req = quote();
        req.client_id = " ".to_string();
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("clientId"));
        assert!(err.to_string().contains("Debe seleccionar un cliente"));
    }

    #[test]
    fn test_quote_requires_items() {
        let mut req = quote();
        req.items.clear();
        req.total_amount = 0;
        assert_eq!(req.validate().unwrap_err().field(), Some("items"));
    }

    #[test]
    fn test_quote_item_total_must_match() {
        let mut req = quote();
        req.items[1].total = 38_001;
        req.total_amount = 238_001;
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("items[1].total"));
    }

    #[test]
    fn test_quote_item_quantity_and_price() {
        let mut req = quote();
        req.items[0] = item("1", 0, 100_000);
        assert_eq!(req.validate().unwrap_err().field(), Some("items[0].quantity"));

        let mut req = quote();
        req.items[0] = item("1", 2, -5);
        assert_eq!(req.validate().unwrap_err().field(), Some("items[0].unitPrice"));
    }

    #[test]
    fn test_quote_item_overflow_is_rejected() {
        let mut req = quote();
        req.items = vec![NewLineItem {
            product_id: "1".to_string(),
            quantity: i64::MAX,
            unit_price: 2,
            total: -2,
            ..Default::default()
        }];
        req.total_amount = -2;
        assert_eq!(req.validate().unwrap_err().field(), Some("items[0].total"));
    }

    #[test]
    fn test_quote_total_amount_must_match_sum() {
        let mut req = quote();
        req.total_amount = 200_000;
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("totalAmount"));
        assert!(err.to_string().contains("suma de los ítems"));
    }

    #[test]
    fn test_quote_from_json() {
        let req: NewQuote = from_json(
            r#"{
                "clientId": "2",
                "validUntil": "2025-04-15",
                "items": [
                    {"productId": "3", "productName": "Producto Premium",
                     "quantity": 5, "unitPrice": 95000, "total": 475000}
                ],
                "totalAmount": 475000,
                "terms": "Cotización válida por 30 días."
            }"#,
        )
        .unwrap();
        let json = serde_json::to_value(req.validate().unwrap()).unwrap();
        assert_eq!(json["status"], "draft");
        assert_eq!(json["validUntil"], "2025-04-15");
        assert_eq!(json["items"][0]["unitPrice"], 95_000);
    }

    #[test]
    fn test_purchase_valid_without_delivery_date() {
        let draft = purchase().validate().unwrap();
        assert_eq!(draft.status, PurchaseStatus::Draft);
        assert!(draft.delivery_date.is_none());
        assert_eq!(draft.total_amount, 150_000);
    }

    #[test]
    fn test_purchase_delivery_date() {
        let mut req = purchase();
        req.delivery_date = Some("2025-05-02".to_string());
        let draft = req.validate().unwrap();
        assert_eq!(draft.delivery_date.unwrap().to_string(), "2025-05-02");

        let mut req = purchase();
        req.delivery_date = Some("mañana".to_string());
        assert_eq!(req.validate().unwrap_err().field(), Some("deliveryDate"));
    }

    #[test]
    fn test_purchase_requires_supplier() {
        let mut req = purchase();
        req.supplier_id = String::new();
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), Some("supplierId"));
    }

    #[test]
    fn test_purchase_total_amount_must_match_sum() {
        let mut req = purchase();
        req.total_amount = 149_999;
        assert_eq!(req.validate().unwrap_err().field(), Some("totalAmount"));
    }
}
