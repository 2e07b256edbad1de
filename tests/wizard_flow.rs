// Integration tests for the Finca Finder wizard

use finca_finder::core::{Step, WizardError, WizardSession};
use finca_finder::models::{
    ContactDetails, MatchOutcome, Operation, Property, StepSelection,
};

fn create_test_property(id: &str, operation: Operation, property_type: &str, price: u64) -> Property {
    Property {
        id: id.to_string(),
        title: format!("Property {}", id),
        operation,
        property_type: property_type.to_string(),
        price,
        zone: Some("Baix Empordà".to_string()),
        town: Some("Palafrugell".to_string()),
        area: Some(120),
        bedrooms: Some(3),
        bathrooms: Some(2),
        features: vec!["Jardín".to_string(), "Piscina".to_string()],
        description: None,
        main_image: None,
        images: vec![],
        highlighted: false,
        energy_certificate: None,
        is_vip: false,
        location: None,
        created_at: None,
        updated_at: None,
    }
}

fn test_contact() -> ContactDetails {
    ContactDetails {
        name: "Marta Soler".to_string(),
        email: "marta@example.com".to_string(),
        phone: Some("+34 600 000 000".to_string()),
    }
}

#[test]
fn test_integration_full_rental_walk() {
    let catalog = vec![
        create_test_property("casa-llafranc", Operation::Rental, "Casa", 1100), // Good match
        create_test_property("casa-cara", Operation::Rental, "Casa", 2500),     // Over budget
        create_test_property("casa-venta", Operation::Sale, "Casa", 320_000),   // Wrong operation
        create_test_property("piso-centro", Operation::Rental, "Piso", 900),    // Wrong type
    ];

    let mut session = WizardSession::new(catalog, vec![]);
    assert_eq!(session.step(), Step::Operation);

    session
        .advance(Some(StepSelection::Operation { operation: Operation::Rental }))
        .unwrap();
    session
        .advance(Some(StepSelection::PropertyType { property_type: "Casa".to_string() }))
        .unwrap();
    session.advance(Some(StepSelection::Bedrooms { minimum: 2 })).unwrap();
    session.advance(Some(StepSelection::Bathrooms { minimum: 1 })).unwrap();
    session.advance(Some(StepSelection::Surface { min_m2: 80 })).unwrap();
    session
        .advance(Some(StepSelection::Features {
            features: vec!["Jardín".to_string()],
            notes: None,
        }))
        .unwrap();
    session.advance(Some(StepSelection::Budget { max_price: 1200 })).unwrap();

    assert_eq!(session.step(), Step::Results);

    let outcome = session.outcome().expect("results step computes an outcome");
    assert_eq!(outcome.total_candidates, 4);

    let ids: Vec<&str> = outcome.matches.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["casa-llafranc"]);
}

#[test]
fn test_integration_commercial_walk_skips_room_steps() {
    let mut local = create_test_property("local-1", Operation::Rental, "Local", 1500);
    local.bedrooms = None;
    local.bathrooms = None;
    local.features = vec!["Escaparate".to_string()];

    let catalog = vec![
        local,
        create_test_property("casa-1", Operation::Rental, "Casa", 1500), // Wrong type
    ];

    let mut session = WizardSession::new(catalog, vec!["Parking clientes".to_string()]);

    session
        .advance(Some(StepSelection::Operation { operation: Operation::Rental }))
        .unwrap();
    session
        .advance(Some(StepSelection::PropertyType { property_type: "Local".to_string() }))
        .unwrap();

    // Room steps are skipped for commercial units
    assert_eq!(session.step(), Step::Surface);

    // The commercial branch swaps the offered feature tags; the dynamic
    // vocabulary is appended on both branches
    let choices = session.feature_choices();
    assert!(choices.contains(&"Escaparate".to_string()));
    assert!(choices.contains(&"Parking clientes".to_string()));
    assert!(!choices.contains(&"Jardín".to_string()));

    session.advance(Some(StepSelection::Surface { min_m2: 0 })).unwrap();
    session
        .advance(Some(StepSelection::Features {
            features: vec!["Escaparate".to_string()],
            notes: None,
        }))
        .unwrap();
    session.advance(Some(StepSelection::Budget { max_price: 2000 })).unwrap();

    assert_eq!(session.step(), Step::Results);

    let outcome = session.outcome().unwrap();
    let ids: Vec<&str> = outcome.matches.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["local-1"]);

    // The filed request never carries room minimums for a commercial unit
    let request = session.begin_submission(&test_contact()).unwrap();
    assert!(!request.description.contains("Habitaciones"));
    assert!(!request.description.contains("Baños"));
}

#[test]
fn test_integration_matches_keep_catalog_order() {
    let catalog = vec![
        create_test_property("c", Operation::Sale, "Casa", 200_000),
        create_test_property("b", Operation::Rental, "Casa", 900), // Wrong operation
        create_test_property("a", Operation::Sale, "Casa", 300_000),
        create_test_property("d", Operation::Sale, "Casa", 250_000),
    ];

    let mut session = WizardSession::new(catalog, vec![]);
    session
        .advance(Some(StepSelection::Operation { operation: Operation::Sale }))
        .unwrap();
    session
        .advance(Some(StepSelection::PropertyType { property_type: "Casa".to_string() }))
        .unwrap();
    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session.advance(Some(StepSelection::Budget { max_price: 500_000 })).unwrap();

    // Catalog listing order survives matching untouched
    let ids: Vec<&str> = session
        .outcome()
        .unwrap()
        .matches
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["c", "a", "d"]);
}

#[test]
fn test_integration_submission_request_content() {
    let catalog = vec![create_test_property("casa-1", Operation::Sale, "Casa", 300_000)];
    let mut session = WizardSession::new(catalog, vec![]);

    session
        .advance(Some(StepSelection::Operation { operation: Operation::Sale }))
        .unwrap();
    session
        .advance(Some(StepSelection::PropertyType { property_type: "Casa".to_string() }))
        .unwrap();
    session.advance(Some(StepSelection::Bedrooms { minimum: 3 })).unwrap();
    session.advance(Some(StepSelection::Bathrooms { minimum: 2 })).unwrap();
    session.advance(Some(StepSelection::Surface { min_m2: 120 })).unwrap();
    session
        .advance(Some(StepSelection::Features {
            features: vec!["Piscina".to_string(), "Jardín".to_string()],
            notes: Some("Cerca de la playa".to_string()),
        }))
        .unwrap();
    session.advance(Some(StepSelection::Budget { max_price: 450_000 })).unwrap();

    let request = session.begin_submission(&test_contact()).unwrap();

    assert_eq!(request.name, "Marta Soler");
    assert_eq!(request.email, "marta@example.com");
    assert_eq!(request.phone.as_deref(), Some("+34 600 000 000"));
    assert_eq!(request.operation, Operation::Sale);
    assert_eq!(request.property_type.as_deref(), Some("Casa"));
    assert_eq!(request.bedrooms, 3);
    assert_eq!(request.bathrooms, 2);
    assert_eq!(request.price_max, Some(450_000));
    assert!(!request.published, "requests are always filed unpublished");

    let expected = "Operación: venta\n\
                    Tipo: Casa\n\
                    Habitaciones: 3+\n\
                    Baños: 2+\n\
                    Superficie mín: 120 m²\n\
                    Imprescindibles: Piscina, Jardín\n\
                    Notas: Cerca de la playa\n\
                    Presupuesto máx: 450000 €";
    assert_eq!(request.description, expected);
}

#[test]
fn test_integration_no_match_still_submits() {
    // Nobody in the catalog has a pool
    let mut casa = create_test_property("casa-1", Operation::Sale, "Casa", 300_000);
    casa.features = vec!["Jardín".to_string()];

    let mut session = WizardSession::new(vec![casa], vec![]);
    session
        .advance(Some(StepSelection::Operation { operation: Operation::Sale }))
        .unwrap();
    session
        .advance(Some(StepSelection::PropertyType { property_type: "Casa".to_string() }))
        .unwrap();
    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session
        .advance(Some(StepSelection::Features {
            features: vec!["Piscina".to_string()],
            notes: None,
        }))
        .unwrap();
    session.advance(Some(StepSelection::Budget { max_price: 500_000 })).unwrap();

    let outcome = session.outcome().unwrap();
    assert_eq!(outcome.matches.len(), 0);
    assert_eq!(outcome.stats.count, 0);
    assert_eq!(outcome.stats.average_price, None);

    // An empty result set is a perfectly good lead
    let request = session.begin_submission(&test_contact()).unwrap();
    assert!(request.description.contains("Imprescindibles: Piscina"));
    assert_eq!(session.first_match_id(), None);
}

#[test]
fn test_integration_result_summary_rounding() {
    let mut a = create_test_property("a", Operation::Sale, "Casa", 195_000);
    a.area = Some(100);
    let mut b = create_test_property("b", Operation::Sale, "Casa", 204_999);
    b.area = None;
    let mut c = create_test_property("c", Operation::Sale, "Casa", 200_000);
    c.area = Some(140);

    let mut session = WizardSession::new(vec![a, b, c], vec![]);
    session
        .advance(Some(StepSelection::Operation { operation: Operation::Sale }))
        .unwrap();
    session
        .advance(Some(StepSelection::PropertyType { property_type: "Casa".to_string() }))
        .unwrap();
    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session.advance(Some(StepSelection::Budget { max_price: 500_000 })).unwrap();

    let result = session.outcome().unwrap();
    let summary = MatchOutcome::from_stats(&result.stats, &result.matches);

    // Mean price is taken over all matches and shown in thousands
    assert_eq!(summary.count, 3);
    assert_eq!(summary.average_price_k, Some(200));

    // Mean area ignores properties with no recorded surface
    assert_eq!(summary.average_area_m2, Some(120));
    assert_eq!(summary.preview.len(), 3);
}

#[test]
fn test_integration_criteria_frozen_on_results() {
    let catalog = vec![create_test_property("casa-1", Operation::Sale, "Casa", 300_000)];
    let mut session = WizardSession::new(catalog, vec![]);

    session
        .advance(Some(StepSelection::Operation { operation: Operation::Sale }))
        .unwrap();
    session
        .advance(Some(StepSelection::PropertyType { property_type: "Casa".to_string() }))
        .unwrap();
    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session.advance(Some(StepSelection::Budget { max_price: 500_000 })).unwrap();
    assert_eq!(session.step(), Step::Results);

    // Results is terminal: no edits, no further navigation
    assert_eq!(
        session.apply(StepSelection::Budget { max_price: 1 }),
        Err(WizardError::CriteriaFrozen)
    );
    assert!(matches!(
        session.advance(None),
        Err(WizardError::InvalidTransition { .. })
    ));
    assert!(matches!(
        session.retreat(),
        Err(WizardError::InvalidTransition { .. })
    ));

    // The computed outcome is untouched by the rejected calls
    assert_eq!(session.outcome().unwrap().matches.len(), 1);
}

#[test]
fn test_integration_type_switch_resets_room_minimums() {
    let catalog = vec![create_test_property("local-1", Operation::Rental, "Local", 1200)];
    let mut session = WizardSession::new(catalog, vec![]);

    session
        .advance(Some(StepSelection::Operation { operation: Operation::Rental }))
        .unwrap();
    session
        .advance(Some(StepSelection::PropertyType { property_type: "Casa".to_string() }))
        .unwrap();
    session.advance(Some(StepSelection::Bedrooms { minimum: 3 })).unwrap();
    session.advance(Some(StepSelection::Bathrooms { minimum: 2 })).unwrap();

    // Back to the type step, switch to a commercial unit
    session.retreat().unwrap();
    session.retreat().unwrap();
    session.retreat().unwrap();
    assert_eq!(session.step(), Step::PropertyType);

    session
        .advance(Some(StepSelection::PropertyType { property_type: "Local".to_string() }))
        .unwrap();
    assert_eq!(session.step(), Step::Surface);

    // The residential room minimums no longer apply
    assert_eq!(session.criteria().min_bedrooms, 0);
    assert_eq!(session.criteria().min_bathrooms, 0);

    session.advance(None).unwrap();
    session.advance(None).unwrap();
    session.advance(Some(StepSelection::Budget { max_price: 1500 })).unwrap();

    let ids: Vec<&str> = session
        .outcome()
        .unwrap()
        .matches
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["local-1"]);
}
