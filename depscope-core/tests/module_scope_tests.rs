//! Module scope resolution tests

mod common;

use std::rc::Rc;

use common::{forward, refs, set, Fixture};
use depscope_core::{
    CyclePolicy, ModuleMeta, RefList, TrackerConfig, TrackerError, UnitRef,
};

#[test]
fn test_empty_module_has_empty_scopes() {
    let mut fx = Fixture::new();
    let main = fx.module("MainModule", ModuleMeta::new());

    let scope = fx.scope(main);
    assert!(scope.compilation.is_empty());
    assert!(!scope.compilation.is_poisoned);
    assert!(scope.exported.is_empty());
    assert!(!scope.exported.is_poisoned);
}

#[test]
fn test_non_module_is_rejected() {
    let mut fx = Fixture::new();
    let random = fx.plain("RandomClass");

    let err = fx.tracker.module_scope(random).unwrap_err();
    assert_eq!(
        err,
        TrackerError::NotAModule {
            name: "RandomClass".into()
        }
    );
}

// ==================== exports ====================

#[test]
fn test_exported_units_land_in_exported_scope() {
    let mut fx = Fixture::new();
    let c = fx.component("Component1");
    let d = fx.directive("Directive1");
    let p = fx.pipe("Pipe1");
    let main = fx.module("MainModule", ModuleMeta::new().exports(vec![c, d, p]));

    let scope = fx.scope(main);
    assert_eq!(scope.exported.directives, set(&[c, d]));
    assert_eq!(scope.exported.pipes, set(&[p]));
    // Exported without being declared: compilation stays empty.
    assert!(scope.compilation.is_empty());
}

#[test]
fn test_exported_module_contributes_its_exported_scope() {
    let mut fx = Fixture::new();
    let c = fx.component("Component1");
    let d = fx.directive("Directive1");
    let p = fx.pipe("Pipe1");
    let sub = fx.module("SubModule", ModuleMeta::new().exports(vec![c, d, p]));
    let extra = fx.directive("Directive2");
    let main = fx.module("MainModule", ModuleMeta::new().exports(vec![sub, extra]));

    let scope = fx.scope(main);
    assert_eq!(scope.exported.directives, set(&[c, d, extra]));
    assert_eq!(scope.exported.pipes, set(&[p]));
    assert!(scope.compilation.is_empty());
}

#[test]
fn test_exported_plain_class_counts_as_directive() {
    let mut fx = Fixture::new();
    let random = fx.plain("RandomClass");
    let p = fx.pipe("Pipe1");
    let main = fx.module("MainModule", ModuleMeta::new().exports(vec![random, p]));

    let scope = fx.scope(main);
    assert_eq!(scope.exported.directives, set(&[random]));
    assert_eq!(scope.exported.pipes, set(&[p]));
    assert!(!scope.is_poisoned());
}

#[test]
fn test_unresolved_export_poisons_exported_scope() {
    let mut fx = Fixture::new();
    let d = fx.directive("Directive1");
    let late = fx.directive("Late");
    let main = fx.module(
        "MainModule",
        ModuleMeta::new().exports(vec![d.into(), forward("Missing"), late.into()]),
    );

    let scope = fx.scope(main);
    assert!(scope.exported.is_poisoned);
    assert!(!scope.compilation.is_poisoned);
    assert_eq!(scope.exported.directives, set(&[d]));
}

// ==================== imports ====================

#[test]
fn test_imported_module_exported_scope_is_visible() {
    let mut fx = Fixture::new();
    let c = fx.component("Component1");
    let d = fx.directive("Directive1");
    let p = fx.pipe("Pipe1");
    let hidden = fx.component("Hidden");
    let sub = fx.module(
        "SubModule",
        ModuleMeta::new().declarations(vec![hidden]).exports(vec![c, d, p]),
    );
    let main = fx.module("MainModule", ModuleMeta::new().imports(vec![sub]));

    let scope = fx.scope(main);
    assert_eq!(scope.compilation.directives, set(&[c, d]));
    assert_eq!(scope.compilation.pipes, set(&[p]));
    assert!(!scope.compilation.contains(hidden));
    assert!(scope.exported.is_empty());
}

#[test]
fn test_imported_standalone_units_are_visible() {
    let mut fx = Fixture::new();
    let c = fx.standalone_component("Component1");
    let d = fx.standalone_directive("Directive1");
    let p = fx.standalone_pipe("Pipe1");
    let main = fx.module("MainModule", ModuleMeta::new().imports(vec![c, d, p]));

    let scope = fx.scope(main);
    assert_eq!(scope.compilation.directives, set(&[c, d]));
    assert_eq!(scope.compilation.pipes, set(&[p]));
    assert!(!scope.compilation.is_poisoned);
}

#[test]
fn test_transitive_reexport_depth_two() {
    // C exports d; B exports C; A imports B.
    let mut fx = Fixture::new();
    let d = fx.directive("D");
    let c = fx.module("C", ModuleMeta::new().exports(vec![d]));
    let b = fx.module("B", ModuleMeta::new().exports(vec![c]));
    let a = fx.module("A", ModuleMeta::new().imports(vec![b]));

    assert!(fx.scope(a).compilation.directives.contains(&d));
}

#[test]
fn test_three_module_chain_end_to_end() {
    let mut fx = Fixture::new();
    let d1 = fx.directive("D1");
    let p1 = fx.pipe("P1");
    let m1 = fx.module("M1", ModuleMeta::new().exports(vec![d1, p1]));
    let m2 = fx.module("M2", ModuleMeta::new().exports(vec![m1]));
    let m3 = fx.module("M3", ModuleMeta::new().imports(vec![m2]));

    let scope = fx.scope(m3);
    assert_eq!(scope.compilation.directives, set(&[d1]));
    assert_eq!(scope.compilation.pipes, set(&[p1]));
    assert!(!scope.compilation.is_poisoned);
}

#[test]
fn test_diamond_import_dedups_and_computes_once() {
    let mut fx = Fixture::new();
    let d = fx.directive("D");
    let shared = fx.module("Shared", ModuleMeta::new().exports(vec![d]));
    let b = fx.module("B", ModuleMeta::new().exports(vec![shared]));
    let c = fx.module("C", ModuleMeta::new().exports(vec![shared, d]));
    let a = fx.module("A", ModuleMeta::new().imports(vec![b, c]));

    let scope = fx.scope(a);
    assert_eq!(scope.compilation.directives.len(), 1);
    assert!(scope.compilation.directives.contains(&d));

    // A, B, C and Shared computed once each; Shared hit once from C.
    let stats = fx.tracker.cache_stats();
    assert_eq!(stats.entries, 4);
    assert_eq!(stats.misses, 4);
    assert_eq!(stats.hits, 1);
}

#[test]
fn test_importing_plain_class_poisons_compilation() {
    let mut fx = Fixture::new();
    let random = fx.plain("RandomClass");
    let main = fx.module("MainModule", ModuleMeta::new().imports(vec![random]));

    let scope = fx.scope(main);
    assert!(scope.compilation.is_poisoned);
}

#[test]
fn test_importing_non_standalone_component_poisons_compilation() {
    let mut fx = Fixture::new();
    let c = fx.component("Component1");
    let main = fx.module("MainModule", ModuleMeta::new().imports(vec![c]));

    assert!(fx.scope(main).compilation.is_poisoned);
}

#[test]
fn test_poison_propagates_through_imports_and_exports() {
    let mut fx = Fixture::new();
    let random = fx.plain("RandomClass");
    let bad = fx.module("Bad", ModuleMeta::new().imports(vec![random]));
    let reexporter = fx.module("Reexporter", ModuleMeta::new().exports(vec![bad]));
    let importer = fx.module("Importer", ModuleMeta::new().imports(vec![reexporter]));

    assert!(fx.scope(bad).compilation.is_poisoned);
    assert!(fx.scope(reexporter).exported.is_poisoned);
    assert!(fx.scope(importer).compilation.is_poisoned);
}

#[test]
fn test_poisoned_scope_keeps_partial_results() {
    let mut fx = Fixture::new();
    let good = fx.standalone_directive("Good");
    let random = fx.plain("RandomClass");
    let late = fx.standalone_directive("Late");
    let main = fx.module("MainModule", ModuleMeta::new().imports(vec![good, random, late]));

    let scope = fx.scope(main);
    assert!(scope.compilation.is_poisoned);
    assert!(scope.compilation.contains(good));
    assert!(!scope.compilation.contains(late));
}

// ==================== declarations ====================

#[test]
fn test_declarations_are_in_compilation_scope() {
    let mut fx = Fixture::new();
    let c = fx.component("Component1");
    let d = fx.directive("Directive1");
    let p = fx.pipe("Pipe1");
    let main = fx.module("MainModule", ModuleMeta::new().declarations(vec![c, d, p]));

    let scope = fx.scope(main);
    assert_eq!(scope.compilation.directives, set(&[c, d]));
    assert_eq!(scope.compilation.pipes, set(&[p]));
    assert!(scope.exported.is_empty());
}

#[test]
fn test_declared_before_imported_in_order() {
    let mut fx = Fixture::new();
    let imported = fx.directive("Imported");
    let sub = fx.module("SubModule", ModuleMeta::new().exports(vec![imported]));
    let own = fx.component("Own");
    let main = fx.module(
        "MainModule",
        ModuleMeta::new().imports(vec![sub]).declarations(vec![own]),
    );

    assert_eq!(fx.scope(main).compilation.ordered(), vec![own, imported]);
}

#[test]
fn test_declaring_standalone_component_poisons() {
    let mut fx = Fixture::new();
    let c = fx.standalone_component("Component1");
    let main = fx.module("MainModule", ModuleMeta::new().declarations(vec![c]));

    assert!(fx.scope(main).compilation.is_poisoned);
}

#[test]
fn test_declaring_module_poisons() {
    let mut fx = Fixture::new();
    let sub = fx.module("SubModule", ModuleMeta::new());
    let main = fx.module("MainModule", ModuleMeta::new().declarations(vec![sub]));

    assert!(fx.scope(main).compilation.is_poisoned);
}

// ==================== cache ====================

#[test]
fn test_cache_hides_later_mutation() {
    let mut fx = Fixture::new();
    let c = fx.component("Component1");
    let main = fx.module("MainModule", ModuleMeta::new().declarations(vec![c]));

    let first = fx.scope(main);
    assert_eq!(first.compilation.directives, set(&[c]));

    fx.tracker
        .registry_mut()
        .module_meta_mut(main)
        .unwrap()
        .declarations = RefList::default();

    let second = fx.scope(main);
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(second.compilation.directives, set(&[c]));
}

#[test]
fn test_clearing_cache_recomputes() {
    let mut fx = Fixture::new();
    let c = fx.component("Component1");
    let main = fx.module("MainModule", ModuleMeta::new().declarations(vec![c]));

    fx.scope(main);
    fx.tracker
        .registry_mut()
        .module_meta_mut(main)
        .unwrap()
        .declarations = RefList::default();

    assert!(fx.tracker.clear_scope_cache_for(main));
    assert!(fx.scope(main).compilation.directives.is_empty());
}

#[test]
fn test_clearing_is_not_transitive() {
    let mut fx = Fixture::new();
    let d = fx.directive("D");
    let sub = fx.module("SubModule", ModuleMeta::new().exports(vec![d]));
    let main = fx.module("MainModule", ModuleMeta::new().imports(vec![sub]));

    fx.scope(main);
    fx.tracker
        .registry_mut()
        .module_meta_mut(sub)
        .unwrap()
        .exports = RefList::default();
    fx.tracker.clear_scope_cache_for(sub);

    // MainModule still holds the scope built from the old SubModule.
    assert!(fx.scope(main).compilation.contains(d));
    assert!(fx.scope(sub).exported.is_empty());

    fx.tracker.clear_scope_cache_for(main);
    assert!(!fx.scope(main).compilation.contains(d));
}

// ==================== forward refs ====================

#[test]
fn test_forward_ref_import_of_later_module() {
    let mut fx = Fixture::new();
    let main = fx.module("MainModule", ModuleMeta::new().imports(vec![forward("SubModule")]));
    let c = fx.component("Component1");
    let d = fx.directive("Directive1");
    let p = fx.pipe("Pipe1");
    fx.module("SubModule", ModuleMeta::new().exports(vec![c, d, p]));

    let scope = fx.scope(main);
    assert_eq!(scope.compilation.directives, set(&[c, d]));
    assert_eq!(scope.compilation.pipes, set(&[p]));
}

#[test]
fn test_deferred_list_import_of_later_module() {
    let mut fx = Fixture::new();
    let main = fx.module(
        "MainModule",
        ModuleMeta::new().imports(RefList::deferred(|reg| {
            reg.lookup("SubModule").map(UnitRef::from).into_iter().collect()
        })),
    );
    let d = fx.directive("Directive1");
    fx.module("SubModule", ModuleMeta::new().exports(vec![d]));

    assert_eq!(fx.scope(main).compilation.directives, set(&[d]));
}

#[test]
fn test_forward_ref_standalone_import() {
    let mut fx = Fixture::new();
    let main = fx.module("MainModule", ModuleMeta::new().imports(vec![forward("Component1")]));
    let c = fx.standalone_component("Component1");

    assert_eq!(fx.scope(main).compilation.directives, set(&[c]));
}

#[test]
fn test_forward_ref_declarations() {
    let mut fx = Fixture::new();
    let main = fx.module(
        "MainModule",
        ModuleMeta::new().declarations(vec![
            forward("Component1"),
            forward("Directive1"),
            forward("Pipe1"),
        ]),
    );
    let c = fx.component("Component1");
    let d = fx.directive("Directive1");
    let p = fx.pipe("Pipe1");

    let scope = fx.scope(main);
    assert_eq!(scope.compilation.directives, set(&[c, d]));
    assert_eq!(scope.compilation.pipes, set(&[p]));
}

#[test]
fn test_forward_ref_exports() {
    let mut fx = Fixture::new();
    let main = fx.module(
        "MainModule",
        ModuleMeta::new().exports(vec![forward("SubModule"), forward("Pipe1")]),
    );
    let d = fx.directive("Directive1");
    let p = fx.pipe("Pipe1");
    fx.module("SubModule", ModuleMeta::new().exports(vec![d]));

    let scope = fx.scope(main);
    assert_eq!(scope.exported.directives, set(&[d]));
    assert_eq!(scope.exported.pipes, set(&[p]));
}

#[test]
fn test_unresolved_forward_ref_poisons() {
    let mut fx = Fixture::new();
    let main = fx.module("MainModule", ModuleMeta::new().imports(vec![forward("Missing")]));

    assert!(fx.scope(main).compilation.is_poisoned);
}

#[test]
fn test_with_providers_contributes_wrapped_module() {
    let mut fx = Fixture::new();
    let d = fx.directive("RouterOutlet");
    let router = fx.module("RouterModule", ModuleMeta::new().exports(vec![d]));
    let main = fx.module(
        "MainModule",
        ModuleMeta::new().imports(vec![UnitRef::with_providers(router.into())]),
    );

    assert_eq!(fx.scope(main).compilation.directives, set(&[d]));
}

// ==================== cycles ====================

#[test]
fn test_cycle_is_an_error_by_default() {
    let mut fx = Fixture::new();
    let a = fx.module("A", ModuleMeta::new().imports(vec![forward("B")]));
    fx.module("B", ModuleMeta::new().imports(vec![forward("A")]));

    let err = fx.tracker.module_scope(a).unwrap_err();
    assert_eq!(
        err,
        TrackerError::CyclicImport {
            chain: vec!["A".into(), "B".into(), "A".into()]
        }
    );
    assert_eq!(fx.tracker.cache_stats().entries, 0);
}

#[test]
fn test_self_export_is_a_cycle() {
    let mut fx = Fixture::new();
    let a = fx.module("A", ModuleMeta::new().exports(vec![forward("A")]));

    assert!(matches!(
        fx.tracker.module_scope(a),
        Err(TrackerError::CyclicImport { .. })
    ));
}

#[test]
fn test_cycle_poisons_under_lenient_policy() {
    let mut fx = Fixture::with_config(TrackerConfig {
        cycle_policy: CyclePolicy::Poison,
        ..TrackerConfig::default()
    });
    let a = fx.module("A", ModuleMeta::new().imports(vec![forward("B")]));
    let b = fx.module("B", ModuleMeta::new().imports(vec![forward("A")]));

    assert!(fx.scope(a).compilation.is_poisoned);
    assert!(fx.scope(b).compilation.is_poisoned);
}

#[test]
fn test_deep_acyclic_chain_resolves_by_default() {
    let mut fx = Fixture::new();
    let d = fx.directive("D");
    let mut last = fx.module("M0", ModuleMeta::new().exports(vec![d]));
    for i in 1..300 {
        last = fx.module(&format!("M{i}"), ModuleMeta::new().exports(vec![last]));
    }

    let scope = fx.tracker.module_scope(last).unwrap();
    assert!(!scope.exported.is_poisoned);
    assert_eq!(scope.exported.ordered(), vec![d]);
}

#[test]
fn test_depth_limit() {
    let mut fx = Fixture::with_config(TrackerConfig {
        max_depth: Some(2),
        ..TrackerConfig::default()
    });
    let m0 = fx.module("M0", ModuleMeta::new());
    let m1 = fx.module("M1", ModuleMeta::new().imports(vec![m0]));
    let m2 = fx.module("M2", ModuleMeta::new().imports(vec![m1]));

    assert_eq!(
        fx.tracker.module_scope(m2).unwrap_err(),
        TrackerError::DepthExceeded { limit: 2 }
    );
    // A shallower entry point still works.
    assert!(fx.tracker.module_scope(m1).is_ok());
}

#[test]
fn test_refs_helper_matches_direct_ids() {
    let mut fx = Fixture::new();
    let d = fx.directive("D");
    let main = fx.module("MainModule", ModuleMeta::new().exports(refs(&[d])));

    assert_eq!(fx.scope(main).exported.directives, set(&[d]));
}
