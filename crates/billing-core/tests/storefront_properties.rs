//! Property tests for the storefront's cart and checkout invariants.

use billing_core::{
    Catalog, CoreError, LoginForm, Money, PaymentMethod, ProductId, Screen, SharedSecretVerifier,
    Storefront,
};
use proptest::prelude::*;

fn signed_in() -> Storefront<SharedSecretVerifier> {
    let mut store = Storefront::new(SharedSecretVerifier::new("password"));
    store
        .login(&mut LoginForm::new("Asha", "password"))
        .expect("demo login");
    store
}

fn product_id() -> impl Strategy<Value = ProductId> {
    (1u32..=11).prop_map(ProductId)
}

/// One operator action while browsing.
#[derive(Debug, Clone)]
enum Action {
    SetQty(ProductId, i64),
    Add(ProductId),
    Remove(ProductId),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (product_id(), -5i64..50).prop_map(|(id, q)| Action::SetQty(id, q)),
        product_id().prop_map(Action::Add),
        (0u32..15).prop_map(|id| Action::Remove(ProductId(id))),
    ]
}

fn apply(store: &mut Storefront<SharedSecretVerifier>, action: &Action) {
    match action {
        Action::SetQty(id, q) => {
            store.set_pending_quantity(*id, *q).expect("catalog id");
        }
        Action::Add(id) => {
            store.add_to_cart(*id).expect("catalog id");
        }
        Action::Remove(id) => {
            store.remove_from_cart(*id).expect("remove never fails");
        }
    }
}

proptest! {
    #[test]
    fn prop_repeated_adds_sum_pending_quantities(
        id in product_id(),
        quantities in prop::collection::vec(-3i64..20, 1..10),
    ) {
        let mut store = signed_in();
        let mut expected = 0i64;

        for q in &quantities {
            store.set_pending_quantity(id, *q).unwrap();
            store.add_to_cart(id).unwrap();
            expected += (*q).max(1);
        }

        let lines: Vec<_> = store.cart().lines().iter().filter(|l| l.product_id == id).collect();
        prop_assert_eq!(lines.len(), 1);
        prop_assert_eq!(lines[0].quantity, expected);
        prop_assert_eq!(store.pending_quantity(id), 1);
    }

    #[test]
    fn prop_total_is_sum_of_line_subtotals(actions in prop::collection::vec(action(), 0..40)) {
        let mut store = signed_in();
        for action in &actions {
            apply(&mut store, action);
        }

        let catalog = Catalog::standard();
        let expected: i64 = store
            .cart()
            .lines()
            .iter()
            .map(|l| catalog.get(l.product_id).unwrap().price.paise() * l.quantity)
            .sum();

        prop_assert_eq!(store.total().paise(), expected);
        prop_assert!(store.cart().lines().iter().all(|l| l.quantity >= 1));

        let mut ids: Vec<_> = store.cart().lines().iter().map(|l| l.product_id).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), store.cart().item_count());
    }

    #[test]
    fn prop_payment_outcome_depends_only_on_amount(
        actions in prop::collection::vec(action(), 0..20),
        extra in product_id(),
        offered_paise in 0i64..200_000,
        method in prop_oneof![
            Just(PaymentMethod::Cash),
            Just(PaymentMethod::Card),
            Just(PaymentMethod::Upi),
        ],
    ) {
        let mut store = signed_in();
        for action in &actions {
            apply(&mut store, action);
        }
        store.add_to_cart(extra).unwrap();

        let before = store.cart().clone();
        let total = store.total();
        store.proceed_to_checkout().unwrap();

        let offered = Money::from_paise(offered_paise);
        match store.submit_payment(Some(offered), method) {
            Err(CoreError::InsufficientPayment { required, .. }) => {
                prop_assert!(offered < total);
                prop_assert_eq!(required, total);
                prop_assert_eq!(store.cart(), &before);
                prop_assert_eq!(store.screen(), Screen::Checkout);
            }
            Ok(receipt) => {
                prop_assert!(offered >= total);
                prop_assert_eq!(receipt.change, offered - total);
                prop_assert!(store.cart().is_empty());
                prop_assert!(store.checkout_view().succeeded);
                prop_assert_eq!(store.screen(), Screen::Browsing);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn prop_logout_always_returns_to_initial_state(
        actions in prop::collection::vec(action(), 0..20),
        open_checkout in any::<bool>(),
    ) {
        let mut store = signed_in();
        for action in &actions {
            apply(&mut store, action);
        }
        if open_checkout && !store.cart().is_empty() {
            store.proceed_to_checkout().unwrap();
        }

        store.logout();

        prop_assert_eq!(store.screen(), Screen::Login);
        prop_assert!(store.session().is_none());
        prop_assert!(store.cart().is_empty());
        prop_assert!(!store.checkout_view().active);
        for product in Catalog::standard().products() {
            prop_assert_eq!(store.pending_quantity(product.id), 1);
        }
    }
}

#[test]
fn empty_cart_never_opens_checkout() {
    let mut store = signed_in();
    for _ in 0..3 {
        assert_eq!(store.proceed_to_checkout(), Err(CoreError::EmptyCart));
        assert_eq!(store.screen(), Screen::Browsing);
    }
}

#[test]
fn wrong_password_leaves_no_session() {
    let mut store = Storefront::new(SharedSecretVerifier::new("password"));
    assert!(store.login(&mut LoginForm::new("Asha", "wrong")).is_err());
    assert!(store.session().is_none());

    let session = store
        .login(&mut LoginForm::new("Asha", "password"))
        .unwrap();
    assert_eq!(session.username, "Asha");
}
