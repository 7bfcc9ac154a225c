use cosmwasm_std::testing::mock_dependencies;
use cosmwasm_std::Decimal;

use fee_abstraction::{FeeTokenMetadata, FeeTokenMetadataCollection, Params, ValidationError};
use fee_abstraction_module::error::ContractError;
use fee_abstraction_module::registry;
use fee_abstraction_module::state::{PARAMS, PRICE_SNAPSHOTS};

mod utils;

fn denoms(collection: &FeeTokenMetadataCollection) -> Vec<&str> {
    collection.iter().map(|token| token.denom.as_str()).collect()
}

#[test]
fn empty_registry() {
    let deps = mock_dependencies();

    assert!(registry::list(deps.as_ref().storage).unwrap().is_empty());
    assert_eq!(registry::get(deps.as_ref().storage, "usdt").unwrap(), None);
}

#[test]
fn adding_and_updating() {
    let mut deps = mock_dependencies();

    registry::add_or_update(deps.as_mut().storage, utils::usdt()).unwrap();
    registry::add_or_update(deps.as_mut().storage, utils::coin_token()).unwrap();

    let collection = registry::list(deps.as_ref().storage).unwrap();
    assert_eq!(denoms(&collection), vec!["usdt", "coin"]);

    // updating an existing token keeps its position
    let updated = FeeTokenMetadata::new("usdt", "usdt", 6, Some(Decimal::percent(5)));
    registry::add_or_update(deps.as_mut().storage, updated.clone()).unwrap();

    let collection = registry::list(deps.as_ref().storage).unwrap();
    assert_eq!(denoms(&collection), vec!["usdt", "coin"]);
    assert_eq!(registry::get(deps.as_ref().storage, "usdt").unwrap(), Some(updated));
}

#[test]
fn adding_many() {
    let mut deps = mock_dependencies();

    registry::add_or_update(deps.as_mut().storage, utils::usdt()).unwrap();

    // a batch repeating a denom is rejected as a whole
    {
        let err = registry::add_or_update_many(
            deps.as_mut().storage,
            vec![
                utils::coin_token(),
                FeeTokenMetadata::new("uatom", "atom", 6, None),
                utils::coin_token(),
            ],
        )
        .unwrap_err();
        assert_eq!(err, ContractError::Validation(ValidationError::duplicate_denom("coin")));

        let collection = registry::list(deps.as_ref().storage).unwrap();
        assert_eq!(denoms(&collection), vec!["usdt"]);
    }

    // a batch with an invalid token is rejected as a whole
    {
        let err = registry::add_or_update_many(
            deps.as_mut().storage,
            vec![utils::coin_token(), FeeTokenMetadata::new("uatom", "atom", 19, None)],
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Validation(ValidationError::InvalidFeeToken { .. })));

        let collection = registry::list(deps.as_ref().storage).unwrap();
        assert_eq!(denoms(&collection), vec!["usdt"]);
    }

    // a valid batch is applied
    {
        registry::add_or_update_many(
            deps.as_mut().storage,
            vec![utils::coin_token(), FeeTokenMetadata::new("usdt", "tether", 6, None)],
        )
        .unwrap();

        let collection = registry::list(deps.as_ref().storage).unwrap();
        assert_eq!(denoms(&collection), vec!["usdt", "coin"]);
        assert_eq!(collection.get("usdt").unwrap().oracle_denom, "tether");
    }
}

#[test]
fn removing() {
    let mut deps = mock_dependencies();

    registry::add_or_update_many(deps.as_mut().storage, vec![utils::usdt(), utils::coin_token()])
        .unwrap();
    PRICE_SNAPSHOTS.save(deps.as_mut().storage, "usdt", &Decimal::percent(10)).unwrap();

    // cannot remove a token that is not registered
    {
        let err = registry::remove(deps.as_mut().storage, "uatom").unwrap_err();
        assert_eq!(err, ContractError::not_found("uatom"));
    }

    // the token and its snapshot are removed
    {
        let removed = registry::remove(deps.as_mut().storage, "usdt").unwrap();
        assert_eq!(removed, utils::usdt());

        let collection = registry::list(deps.as_ref().storage).unwrap();
        assert_eq!(denoms(&collection), vec!["coin"]);

        let snapshot = PRICE_SNAPSHOTS.may_load(deps.as_ref().storage, "usdt").unwrap();
        assert_eq!(snapshot, None);
    }
}

#[test]
fn replacing() {
    let mut deps = mock_dependencies();

    PARAMS.save(deps.as_mut().storage, &Params::default()).unwrap();
    registry::add_or_update(deps.as_mut().storage, utils::usdt()).unwrap();

    // the native denom cannot be a fee token
    {
        let err = registry::replace(
            deps.as_mut().storage,
            FeeTokenMetadataCollection::new(vec![FeeTokenMetadata::new("akii", "kii", 18, None)]),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::native_denom_as_fee_token("akii"));

        let collection = registry::list(deps.as_ref().storage).unwrap();
        assert_eq!(denoms(&collection), vec!["usdt"]);
    }

    // replacing is not a merge
    {
        let collection = FeeTokenMetadataCollection::new(vec![utils::coin_token()]);
        registry::replace(deps.as_mut().storage, collection).unwrap();

        let collection = registry::list(deps.as_ref().storage).unwrap();
        assert_eq!(denoms(&collection), vec!["coin"]);
    }

    // the registry may be emptied
    {
        registry::replace(deps.as_mut().storage, FeeTokenMetadataCollection::default()).unwrap();
        assert!(registry::list(deps.as_ref().storage).unwrap().is_empty());
    }
}

#[test]
fn repointing_oracle_denom() {
    let mut deps = mock_dependencies();

    registry::add_or_update_many(deps.as_mut().storage, vec![utils::usdt(), utils::coin_token()])
        .unwrap();
    PRICE_SNAPSHOTS.save(deps.as_mut().storage, "usdt", &Decimal::percent(10)).unwrap();
    PRICE_SNAPSHOTS.save(deps.as_mut().storage, "coin", &Decimal::percent(200)).unwrap();

    // same oracle denom, new floor: the reference still applies
    let floored = FeeTokenMetadata::new("usdt", "usdt", 18, Some(Decimal::percent(5)));
    registry::add_or_update(deps.as_mut().storage, floored).unwrap();

    let snapshot = PRICE_SNAPSHOTS.may_load(deps.as_ref().storage, "usdt").unwrap();
    assert_eq!(snapshot, Some(Decimal::percent(10)));

    // priced from another oracle denom: the reference is dropped
    let repointed = FeeTokenMetadata::new("usdt", "tether", 18, None);
    registry::add_or_update(deps.as_mut().storage, repointed).unwrap();

    let snapshot = PRICE_SNAPSHOTS.may_load(deps.as_ref().storage, "usdt").unwrap();
    assert_eq!(snapshot, None);

    let snapshot = PRICE_SNAPSHOTS.may_load(deps.as_ref().storage, "coin").unwrap();
    assert_eq!(snapshot, Some(Decimal::percent(200)));
}
