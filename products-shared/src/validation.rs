//! Field constraints shared by product creation and partial updates.
//!
//! Every check returns `Err(String)` with a human readable message; callers
//! wrap it in their own error type.

/// Maximum length of a product name, in characters.
pub const NAME_MAX_CHARS: usize = 200;

/// Maximum length of a product description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Maximum length of a product category, in characters.
pub const CATEGORY_MAX_CHARS: usize = 100;

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    let chars = value.chars().count();
    if chars < min {
        return Err(format!("{} must not be empty", field));
    }
    if chars > max {
        return Err(format!(
            "{} must be at most {} characters (got {})",
            field, max, chars
        ));
    }
    Ok(())
}

/// Name must be non-empty and at most [`NAME_MAX_CHARS`] characters.
pub fn validate_name(name: &str) -> Result<(), String> {
    check_length("name", name, 1, NAME_MAX_CHARS)
}

/// Description may be empty but not longer than [`DESCRIPTION_MAX_CHARS`].
pub fn validate_description(description: &str) -> Result<(), String> {
    check_length("description", description, 0, DESCRIPTION_MAX_CHARS)
}

/// Category must be non-empty and at most [`CATEGORY_MAX_CHARS`] characters.
pub fn validate_category(category: &str) -> Result<(), String> {
    check_length("category", category, 1, CATEGORY_MAX_CHARS)
}

/// Price must be a finite number strictly greater than zero.
pub fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() {
        return Err("price must be a finite number".to_string());
    }
    if price <= 0.0 {
        return Err(format!("price must be greater than 0 (got {})", price));
    }
    Ok(())
}

/// Stock must be zero or positive.
pub fn validate_stock(stock: i32) -> Result<(), String> {
    if stock < 0 {
        return Err(format!("stock must be greater than or equal to 0 (got {})", stock));
    }
    Ok(())
}

/// Document keys must be non-empty, must not contain a path separator and
/// must not be a dot segment.
///
/// The engine client joins the key onto the index URL, which resolves `.` and
/// `..`: a delete of `..` would target the index itself.
pub fn validate_product_id(id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err("product id is required".to_string());
    }
    if id == "." || id == ".." {
        return Err(format!("product id '{}' is not a valid document key", id));
    }
    if id.contains('/') {
        return Err(format!("product id '{}' contains invalid character '/'", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        assert!(validate_name("Widget").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"a".repeat(NAME_MAX_CHARS)).is_ok());
        assert!(validate_name(&"a".repeat(NAME_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 'é' is two bytes in UTF-8
        let name = "é".repeat(NAME_MAX_CHARS);
        assert!(name.len() > NAME_MAX_CHARS);
        assert!(validate_name(&name).is_ok());
    }

    #[test]
    fn test_description_may_be_empty() {
        assert!(validate_description("").is_ok());
        assert!(validate_description(&"d".repeat(DESCRIPTION_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn test_category_bounds() {
        assert!(validate_category("tools").is_ok());
        assert!(validate_category("").is_err());
        assert!(validate_category(&"c".repeat(CATEGORY_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn test_price() {
        assert!(validate_price(9.99).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(12).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_product_id() {
        assert!(validate_product_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id("a/b").is_err());
    }

    #[test]
    fn test_product_id_rejects_dot_segments() {
        assert!(validate_product_id(".").is_err());
        assert!(validate_product_id("..").is_err());
        assert!(validate_product_id("...").is_ok());
        assert!(validate_product_id(".hidden").is_ok());
        assert!(validate_product_id("v1..2").is_ok());
    }
}
