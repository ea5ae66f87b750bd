//! Startup data for dev and the black-box tests.

use rust_decimal::Decimal;

use stockroom_auth::Role;

use crate::{InMemoryProductStore, InMemoryUserStore, NewUser, UserStoreError, products::ProductDraft};

/// Seed the well-known accounts and a few catalog entries.
///
/// Idempotent: does nothing when users already exist.
pub fn seed(users: &InMemoryUserStore, products: &InMemoryProductStore) -> Result<(), UserStoreError> {
    if users.count()? > 0 {
        return Ok(());
    }

    users.insert(NewUser {
        username: "admin".to_string(),
        email: "admin@tecsup.edu.pe".to_string(),
        password: "admin123".to_string(),
        first_name: "Administrador".to_string(),
        last_name: "Sistema".to_string(),
        role: Role::Admin,
    })?;

    users.insert(NewUser {
        username: "usuario".to_string(),
        email: "usuario@tecsup.edu.pe".to_string(),
        password: "user123".to_string(),
        first_name: "Usuario".to_string(),
        last_name: "Prueba".to_string(),
        role: Role::User,
    })?;

    let drafts = [
        ProductDraft {
            name: "Laptop HP Pavilion".to_string(),
            description: "Laptop HP Pavilion 15, Intel i5, 8GB RAM, 512GB SSD".to_string(),
            price: Decimal::new(250000, 2),
            stock: 15,
            category: "Tecnología".to_string(),
            brand: "HP".to_string(),
            image_url: Some("https://example.com/laptop.jpg".to_string()),
        },
        ProductDraft {
            name: "iPhone 14".to_string(),
            description: "iPhone 14 128GB, pantalla 6.1, cámara dual".to_string(),
            price: Decimal::new(350000, 2),
            stock: 25,
            category: "Tecnología".to_string(),
            brand: "Apple".to_string(),
            image_url: Some("https://example.com/iphone.jpg".to_string()),
        },
        ProductDraft {
            name: "Silla Ergonómica".to_string(),
            description: "Silla de oficina ergonómica con soporte lumbar".to_string(),
            price: Decimal::new(45000, 2),
            stock: 30,
            category: "Hogar".to_string(),
            brand: "Oficina Pro".to_string(),
            image_url: Some("https://example.com/silla.jpg".to_string()),
        },
        ProductDraft {
            name: "Producto Stock Bajo".to_string(),
            description: "Producto para demostrar alerta de stock bajo".to_string(),
            price: Decimal::new(10000, 2),
            stock: 5,
            category: "Prueba".to_string(),
            brand: "Test".to_string(),
            image_url: None,
        },
    ];

    for draft in drafts {
        if let Err(e) = products.create(draft) {
            tracing::warn!(error = %e, "failed to seed product");
        }
    }

    tracing::info!("seeded initial users and products");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_auth::UserLookup;

    #[test]
    fn seeds_accounts_and_products_once() {
        let users = InMemoryUserStore::new();
        let products = InMemoryProductStore::new();

        seed(&users, &products).unwrap();
        assert_eq!(users.count().unwrap(), 2);
        assert_eq!(products.list().unwrap().len(), 4);

        let admin = users.find_by_username("admin").unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        let usuario = users.find_by_email("usuario@tecsup.edu.pe").unwrap().unwrap();
        assert_eq!(usuario.role, Role::User);

        // Idempotent.
        seed(&users, &products).unwrap();
        assert_eq!(users.count().unwrap(), 2);
        assert_eq!(products.list().unwrap().len(), 4);
    }
}
