use rust_decimal::Decimal;
use storefront_api::{
    db::{create_pool, orm_from_pool, run_migrations},
    dto::{
        address::AddressRequest,
        category::CategoryRequest,
        order::{OrderDetailRequest, OrderRequest},
        product::ProductRequest,
    },
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{ListParams, OrderListParams, QueryMap},
    state::Services,
};
use uuid::Uuid;

// Postgres flow: register -> address -> product -> order -> replace -> delete.
#[tokio::test]
async fn order_transactions_against_postgres() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run the Postgres flow."
            );
            return Ok(());
        }
    };

    let pool = create_pool(&database_url, 5).await?;
    run_migrations(&pool).await?;
    let services = Services::postgres(orm_from_pool(pool));

    let owner = AuthUser {
        user_uuid: Uuid::new_v4(),
        email: Some(format!("{}@example.com", Uuid::new_v4())),
        role: "user".into(),
    };
    assert!(services.users.register(&owner).await?);
    assert!(!services.users.register(&owner).await?);

    let address_id = services
        .addresses
        .create(
            owner.user_uuid,
            &AddressRequest {
                title: "Home".into(),
                name: "Ada Lovelace".into(),
                address: "12 St James's Square".into(),
                city: "London".into(),
                state: "London".into(),
                postal_code: "SW1Y 4JH".into(),
                phone: "+44 20 7946 0000".into(),
            },
        )
        .await?;

    let slug = format!("flow-{}", Uuid::new_v4());
    let categ_id = services
        .categories
        .create(&CategoryRequest {
            name: "Flow".into(),
            path: slug.clone(),
        })
        .await?;
    let product_id = services
        .products
        .create(&ProductRequest {
            title: "Flow Widget".into(),
            price: Decimal::new(1999, 2),
            stock: 10,
            category_id: categ_id,
            path: slug.clone(),
            ..Default::default()
        })
        .await?;
    let product = services.products.get_by_slug(&slug).await?;
    assert_eq!(product.category_path.as_deref(), Some(slug.as_str()));

    services.stock.adjust(product_id, -4).await?;
    assert_eq!(services.products.get_by_id(product_id).await?.stock, 6);

    let line = |quantity: i32| OrderDetailRequest {
        product_id,
        quantity,
        price: Decimal::new(1999, 2),
    };
    let order_id = services
        .orders
        .create(
            owner.user_uuid,
            &OrderRequest {
                address_id,
                total: Decimal::new(3998, 2),
                details: vec![line(2)],
            },
        )
        .await?;

    // A missing product fails the whole transaction.
    let failed = services
        .orders
        .create(
            owner.user_uuid,
            &OrderRequest {
                address_id,
                total: Decimal::new(1999, 2),
                details: vec![line(1), OrderDetailRequest {
                    product_id: i32::MAX,
                    quantity: 1,
                    price: Decimal::ONE,
                }],
            },
        )
        .await;
    assert!(matches!(failed, Err(AppError::Database(_))));

    // A failed replace leaves the previous header and lines in place.
    let failed = services
        .orders
        .update(
            owner.user_uuid,
            order_id,
            &OrderRequest {
                address_id,
                total: Decimal::new(5997, 2),
                details: vec![line(3), OrderDetailRequest {
                    product_id: i32::MAX,
                    quantity: 1,
                    price: Decimal::ONE,
                }],
            },
        )
        .await;
    assert!(matches!(failed, Err(AppError::Database(_))));
    let stored = services.orders.get(owner.user_uuid, order_id).await?;
    assert_eq!(stored.total, Decimal::new(3998, 2));
    assert_eq!(stored.details.len(), 1);
    assert_eq!(stored.details[0].quantity, 2);

    let history = services
        .orders
        .list(owner.user_uuid, &OrderListParams::from_query(&QueryMap::new())?)
        .await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, order_id);

    services
        .orders
        .update(
            owner.user_uuid,
            order_id,
            &OrderRequest {
                address_id,
                total: Decimal::new(5997, 2),
                details: vec![line(1), line(2)],
            },
        )
        .await?;
    let stored = services.orders.get(owner.user_uuid, order_id).await?;
    assert_eq!(stored.details.len(), 2);
    assert_eq!(stored.total, Decimal::new(5997, 2));

    let intruder = Uuid::new_v4();
    assert!(matches!(
        services.orders.delete(intruder, order_id).await,
        Err(AppError::NotFound(_))
    ));
    services.orders.delete(owner.user_uuid, order_id).await?;
    assert!(matches!(
        services.orders.get(owner.user_uuid, order_id).await,
        Err(AppError::NotFound(_))
    ));

    // Callers without a user row get one on their first address.
    let newcomer = AuthUser {
        user_uuid: Uuid::new_v4(),
        email: Some(format!("{}@example.com", Uuid::new_v4())),
        role: "user".into(),
    };
    services.users.ensure_registered(&newcomer).await?;
    services.users.ensure_registered(&newcomer).await?;
    assert_eq!(
        services.users.get(newcomer.user_uuid).await?.email,
        newcomer.email.clone().unwrap_or_default()
    );

    let admin = AuthUser {
        user_uuid: Uuid::new_v4(),
        email: None,
        role: "admin".into(),
    };
    assert!(!services.admin_users.list(&admin, &ListParams::default()).await?.is_empty());
    services.admin_users.delete(&admin, owner.user_uuid).await?;
    services.admin_users.delete(&admin, newcomer.user_uuid).await?;
    services.products.delete(product_id).await?;
    services.categories.delete(categ_id).await?;

    Ok(())
}
