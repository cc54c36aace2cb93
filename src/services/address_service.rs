use std::sync::Arc;

use uuid::Uuid;

use crate::{
    dto::address::AddressRequest,
    error::{AppError, AppResult},
    models::Address,
    repository::AddressStorage,
};

pub struct AddressService {
    repo: Arc<dyn AddressStorage>,
}

impl AddressService {
    pub fn new(repo: Arc<dyn AddressStorage>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, owner: Uuid, input: &AddressRequest) -> AppResult<i32> {
        validate(input)?;
        self.repo.insert(owner, input).await
    }

    pub async fn update(&self, owner: Uuid, id: i32, input: &AddressRequest) -> AppResult<i32> {
        validate(input)?;
        if !self.repo.update(owner, id, input).await? {
            return Err(not_found(id));
        }
        Ok(id)
    }

    pub async fn delete(&self, owner: Uuid, id: i32) -> AppResult<i32> {
        if !self.repo.exists(owner, id).await? {
            return Err(not_found(id));
        }
        self.repo.delete(owner, id).await?;
        Ok(id)
    }

    pub async fn get(&self, owner: Uuid, id: i32) -> AppResult<Address> {
        self.repo.get(owner, id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn list(&self, owner: Uuid) -> AppResult<Vec<Address>> {
        self.repo.list(owner).await
    }
}

fn not_found(id: i32) -> AppError {
    AppError::not_found(format!("address {id} not found"))
}

/// Every field is required; the first missing one is reported.
pub fn validate(input: &AddressRequest) -> AppResult<()> {
    let fields = [
        (&input.title, "title"),
        (&input.name, "name"),
        (&input.address, "address"),
        (&input.city, "city"),
        (&input.state, "state"),
        (&input.postal_code, "postal code"),
        (&input.phone, "phone"),
    ];
    match fields.iter().find(|(value, _)| value.trim().is_empty()) {
        Some((_, field)) => Err(AppError::validation(format!("missing {field}"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MemoryStore, UserStorage};

    fn home() -> AddressRequest {
        AddressRequest {
            title: "Home".into(),
            name: "Ada Lovelace".into(),
            address: "12 St James's Square".into(),
            city: "London".into(),
            state: "London".into(),
            postal_code: "SW1Y 4JH".into(),
            phone: "+44 20 7946 0000".into(),
        }
    }

    #[test]
    fn reports_first_missing_field() {
        assert!(validate(&home()).is_ok());

        let err = validate(&AddressRequest::default()).unwrap_err();
        assert_eq!(err.to_string(), "missing title");

        let err = validate(&AddressRequest {
            city: String::new(),
            phone: String::new(),
            ..home()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "missing city");

        let err = validate(&AddressRequest {
            postal_code: " ".into(),
            ..home()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "missing postal code");
    }

    #[tokio::test]
    async fn addresses_are_scoped_to_their_owner() {
        let store = Arc::new(MemoryStore::new());
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let users: Arc<dyn UserStorage> = store.clone();
        users.register(alice, "alice@example.com").await.unwrap();
        users.register(bob, "bob@example.com").await.unwrap();
        let service = AddressService::new(store);

        let id = service.create(alice, &home()).await.unwrap();
        assert!(id > 0);

        assert!(matches!(
            service.update(bob, id, &home()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(bob, id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(service.list(bob).await.unwrap().is_empty());

        let stored = service.get(alice, id).await.unwrap();
        assert_eq!(stored.city, "London");
        service.delete(alice, id).await.unwrap();
        assert!(service.list(alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unregistered_owner_writes_nothing() {
        let service = AddressService::new(Arc::new(MemoryStore::new()));
        let stranger = Uuid::new_v4();

        assert!(matches!(
            service.create(stranger, &home()).await,
            Err(AppError::Internal(_))
        ));
        assert!(service.list(stranger).await.unwrap().is_empty());
    }
}
