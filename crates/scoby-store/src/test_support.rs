//! Shared test utilities for scoby-store tests.

#[cfg(test)]
pub(crate) mod helpers {
    use scoby_core::entities::TeaSettings;

    use crate::memory::MemoryStore;
    use crate::service::{NewTea, NotebookService};

    pub fn new_tea(name: &str) -> NewTea {
        NewTea {
            name: name.to_string(),
            tea_grams_per_liter: 5.0,
            incubator_temperature: 26.0,
            sugar_type: "Sucrose".to_string(),
            sugar_grams_per_liter: 70.0,
            inoculum_concentration: 10.0,
        }
    }

    pub fn new_tea_settings(id: u32, name: &str) -> TeaSettings {
        TeaSettings {
            sugar_type: "Sucrose".to_string(),
            ..TeaSettings::placeholder(id, name)
        }
    }

    /// Service over an empty in-memory store.
    pub fn memory_service(user: &str) -> NotebookService<MemoryStore> {
        NotebookService::new(MemoryStore::new(), user)
    }

    /// Service whose user already has the teas Assam (1) and Sencha (2).
    pub async fn seeded_service(user: &str) -> NotebookService<MemoryStore> {
        let svc = memory_service(user);
        svc.add_tea(new_tea("Assam")).await.unwrap();
        svc.add_tea(new_tea("Sencha")).await.unwrap();
        svc
    }
}
