use crate::api::{NewPurchaseDetail, ProductInput};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub editing: Option<i64>,
    pub name: String,
    pub price: String,
}

pub fn build_product_input(form: &ProductForm) -> Result<ProductInput, String> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err("El nombre es obligatorio".into());
    }
    let price = form
        .price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| *price > 0.0)
        .ok_or("El precio debe ser mayor a 0")?;
    Ok(ProductInput {
        name: name.to_string(),
        price,
    })
}

pub fn build_purchase_line(product_id: Option<i64>, quantity: u32) -> Result<NewPurchaseDetail, String> {
    let product_id = product_id.ok_or("Selecciona un producto")?;
    if quantity < 1 {
        return Err("La cantidad debe ser al menos 1".into());
    }
    Ok(NewPurchaseDetail {
        product_id,
        quantity,
    })
}
