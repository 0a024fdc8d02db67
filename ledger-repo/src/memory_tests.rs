//! In-memory store integration tests.

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use ledger_types::{
        Amount, Client, LedgerStore, NewRepayment, NewTransaction, ServiceId, Step, StoreError,
        TransactionId, TransactionKind,
    };

    use crate::MemoryStore;

    fn new_transaction(
        service_id: ServiceId,
        kind: TransactionKind,
        amount: i64,
        parent: Option<TransactionId>,
    ) -> NewTransaction {
        NewTransaction {
            kind,
            service_id,
            amount: Amount::from_minor(amount).unwrap(),
            parent,
            provider: "Stripe".to_string(),
            client: Client::default(),
            description: None,
            service_data: None,
            articles: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_service() {
        let store = MemoryStore::new();

        let service = store.create_service("Cafeteria".to_string()).await.unwrap();

        assert_eq!(service.name, "Cafeteria");

        let fetched = store.get_service(service.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, service.id);
    }

    #[tokio::test]
    async fn test_get_service_not_found() {
        let store = MemoryStore::new();

        let result = store.get_service(ServiceId::new(404)).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_record_transaction_assigns_identity() {
        let store = MemoryStore::new();
        let service = store.create_service("Cafeteria".to_string()).await.unwrap();

        let first = store
            .record_transaction(new_transaction(
                service.id,
                TransactionKind::Immediate,
                1000,
                None,
            ))
            .await
            .unwrap();
        let second = store
            .record_transaction(new_transaction(
                service.id,
                TransactionKind::Immediate,
                500,
                None,
            ))
            .await
            .unwrap();

        assert!(second.id > first.id);
        assert_ne!(first.uuid, second.uuid);
        assert_eq!(first.step, Step::Pending);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_transactions_for_service_are_id_ordered() {
        let store = MemoryStore::new();
        let service = store.create_service("Cafeteria".to_string()).await.unwrap();
        let other = store.create_service("Bookshop".to_string()).await.unwrap();

        for amount in [300, 100, 200] {
            store
                .record_transaction(new_transaction(
                    service.id,
                    TransactionKind::Immediate,
                    amount,
                    None,
                ))
                .await
                .unwrap();
        }
        store
            .record_transaction(new_transaction(
                other.id,
                TransactionKind::Immediate,
                999,
                None,
            ))
            .await
            .unwrap();

        let txs = store.transactions_for_service(service.id).await.unwrap();

        assert_eq!(txs.len(), 3);
        assert!(txs.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[tokio::test]
    async fn test_children_of_scans_back_references() {
        let store = MemoryStore::new();
        let service = store.create_service("Cafeteria".to_string()).await.unwrap();

        let parent = store
            .record_transaction(new_transaction(
                service.id,
                TransactionKind::Immediate,
                1000,
                None,
            ))
            .await
            .unwrap();
        let refund = store
            .record_transaction(new_transaction(
                service.id,
                TransactionKind::Refund,
                400,
                Some(parent.id),
            ))
            .await
            .unwrap();

        let children = store.children_of(parent.id).await.unwrap();

        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, refund.id);
        assert!(store.children_of(refund.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transition_step_compare_and_set() {
        let store = MemoryStore::new();
        let service = store.create_service("Cafeteria".to_string()).await.unwrap();

        let tx = store
            .record_transaction(new_transaction(
                service.id,
                TransactionKind::Immediate,
                1000,
                None,
            ))
            .await
            .unwrap();

        let paid = store
            .transition_step(tx.id, Step::Pending, Step::Paid)
            .await
            .unwrap();
        assert_eq!(paid.step, Step::Paid);
        assert!(paid.updated_at >= paid.created_at);

        // The losing callback sees a conflict, not a lost update.
        let result = store
            .transition_step(tx.id, Step::Pending, Step::Failed)
            .await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));

        let stored = store.get_transaction(tx.id).await.unwrap().unwrap();
        assert_eq!(stored.step, Step::Paid);
    }

    #[tokio::test]
    async fn test_transition_step_not_found() {
        let store = MemoryStore::new();

        let result = store
            .transition_step(TransactionId::new(404), Step::Pending, Step::Paid)
            .await;

        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_record_and_list_repayments() {
        let store = MemoryStore::new();
        let service = store.create_service("Cafeteria".to_string()).await.unwrap();

        store
            .record_repayment(NewRepayment {
                service_id: service.id,
                amount: Amount::from_minor(200).unwrap(),
                done_at: Some(Utc::now()),
            })
            .await
            .unwrap();
        store
            .record_repayment(NewRepayment {
                service_id: service.id,
                amount: Amount::from_minor(300).unwrap(),
                done_at: None,
            })
            .await
            .unwrap();

        let repayments = store.repayments_for_service(service.id).await.unwrap();

        assert_eq!(repayments.len(), 2);
        assert!(repayments[0].is_settled());
        assert!(!repayments[1].is_settled());
    }
}
