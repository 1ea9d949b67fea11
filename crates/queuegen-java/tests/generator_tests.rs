//! End-to-end tests of the atomic queue generator on realistic sources.
//!
//! The fixtures under `tests/fixtures/` are unsafe-family queue sources in
//! the shape the generator expects: marker-tagged node reference classes,
//! an ignored method, and the one class that is finalized.

use std::fs;
use std::path::PathBuf;

use queuegen_core::config::GeneratorConfig;
use queuegen_core::error::GenError;
use queuegen_core::naming::{translate_file_name, translate_queue_name};
use queuegen_java::generator::{AtomicQueueGenerator, GeneratedUnit};

// ============================================================================
// Test Infrastructure
// ============================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn generate_fixture(name: &str) -> GeneratedUnit {
    let source = fs::read_to_string(fixtures_dir().join(name)).unwrap();
    let config = GeneratorConfig::default();
    AtomicQueueGenerator::new(&config)
        .generate(name, &source)
        .unwrap()
}

fn generate_source(name: &str, source: &str) -> Result<GeneratedUnit, GenError> {
    let config = GeneratorConfig::default();
    AtomicQueueGenerator::new(&config).generate(name, source)
}

/// The text of the class declaration called `name`, up to the next top-level class.
fn class_section<'a>(text: &'a str, name: &str) -> &'a str {
    let start = text
        .find(&format!("class {name}<"))
        .unwrap_or_else(|| panic!("class {name} not found"));
    let rest = &text[start..];
    let end = rest[1..]
        .find("\nabstract class ")
        .or_else(|| rest[1..].find("\n/**"))
        .map(|i| i + 1)
        .unwrap_or(rest.len());
    &rest[..end]
}

// ============================================================================
// Naming
// ============================================================================

mod naming {
    use super::*;

    #[test]
    fn non_matching_names_translate_to_themselves() {
        for name in [
            "Foo",
            "Queue",
            "MessagePassingQueue",
            "SpscArrayQueue",
            "MpscLinkedAtomicQueue",
            "LinkedQueueNode",
            "Mpsc",
        ] {
            let once = translate_queue_name(name);
            assert_eq!(once, name);
            assert_eq!(translate_queue_name(&once), once);
        }
    }

    #[test]
    fn known_names_translate() {
        assert_eq!(translate_queue_name("MpscLinkedQueue"), "MpscLinkedAtomicQueue");
        assert_eq!(translate_queue_name("BaseLinkedQueue"), "BaseLinkedAtomicQueue");
        assert_eq!(translate_queue_name("Foo"), "Foo");
    }

    #[test]
    fn output_file_name_is_translated() {
        assert_eq!(
            translate_file_name("MpmcLinkedQueue.java"),
            "MpmcLinkedAtomicQueue.java"
        );
        let unit = generate_fixture("MpscLinkedQueue.java");
        assert_eq!(unit.file_name, "MpscLinkedAtomicQueue.java");
    }
}

// ============================================================================
// Whole-file Rewrites
// ============================================================================

mod base_linked_queue {
    use super::*;

    #[test]
    fn package_and_class_names_move_to_atomic_family() {
        let unit = generate_fixture("BaseLinkedQueue.java");
        assert_eq!(unit.file_name, "BaseLinkedAtomicQueue.java");
        let text = &unit.text;
        assert!(text.contains("package org.jctools.queues.atomic;"));
        assert!(text.contains("abstract class BaseLinkedAtomicQueuePad0<E> extends AbstractQueue<E> implements MessagePassingQueue<E>"));
        assert!(text.contains(
            "abstract class BaseLinkedAtomicQueueConsumerNodeRef<E> extends BaseLinkedAtomicQueuePad1<E>"
        ));
        assert!(text.contains("abstract class BaseLinkedAtomicQueue<E> extends BaseLinkedAtomicQueuePad2<E>"));
        assert!(!text.contains("class BaseLinkedQueue"));
        assert!(!text.contains("extends BaseLinkedQueue"));
    }

    #[test]
    fn producer_accessors_are_dispatched() {
        let unit = generate_fixture("BaseLinkedQueue.java");
        let producer = class_section(&unit.text, "BaseLinkedAtomicQueueProducerNodeRef");

        assert!(producer.contains(
            "final void soProducerNode(LinkedQueueAtomicNode<E> newValue)\n    {\n        P_NODE_UPDATER.lazySet(this, newValue);\n    }"
        ));
        assert!(producer.contains(
            "final void spProducerNode(LinkedQueueAtomicNode<E> newValue)\n    {\n        P_NODE_UPDATER.lazySet(this, newValue);\n    }"
        ));
        assert!(producer.contains(
            "final LinkedQueueAtomicNode<E> lvProducerNode()\n    {\n        return producerNode;\n    }"
        ));
        assert!(producer.contains(
            "{\n        return P_NODE_UPDATER.compareAndSet(this, expect, newValue);\n    }"
        ));
        assert!(producer.contains("private volatile LinkedQueueAtomicNode<E> producerNode;"));
    }

    #[test]
    fn updater_and_exchange_appear_once() {
        let unit = generate_fixture("BaseLinkedQueue.java");
        let text = &unit.text;
        assert_eq!(text.matches("P_NODE_UPDATER = ").count(), 1);
        assert_eq!(text.matches("C_NODE_UPDATER = ").count(), 1);
        assert_eq!(text.matches("xchgProducerNode(").count(), 1);
        assert!(text.contains(
            "protected final LinkedQueueAtomicNode<E> xchgProducerNode(LinkedQueueAtomicNode<E> newValue) {\n        return P_NODE_UPDATER.getAndSet(this, newValue);\n    }"
        ));

        let producer = class_section(text, "BaseLinkedAtomicQueueProducerNodeRef");
        assert!(producer.starts_with(
            "class BaseLinkedAtomicQueueProducerNodeRef<E> extends BaseLinkedAtomicQueuePad0<E>\n{\n    private static final AtomicReferenceFieldUpdater<BaseLinkedAtomicQueueProducerNodeRef, LinkedQueueAtomicNode> P_NODE_UPDATER"
        ));
        assert!(producer.contains("xchgProducerNode"));
        assert_eq!(unit.stats.updaters, 2);
    }

    #[test]
    fn statics_and_markers_are_stripped() {
        let unit = generate_fixture("BaseLinkedQueue.java");
        let text = &unit.text;
        assert!(!text.contains("P_NODE_OFFSET"));
        assert!(!text.contains("C_NODE_OFFSET"));
        assert!(!text.contains("fieldOffset"));
        assert!(!text.contains("UNSAFE"));
        assert!(!text.contains("$gen:"));
    }

    #[test]
    fn ignored_method_is_removed() {
        let unit = generate_fixture("BaseLinkedQueue.java");
        assert!(!unit.text.contains("public final int size()"));
        assert!(unit.text.contains("public String toString()"));
    }

    #[test]
    fn node_types_are_substituted() {
        let unit = generate_fixture("BaseLinkedQueue.java");
        let text = &unit.text;
        assert!(!text.contains("LinkedQueueNode<"));
        assert!(text.contains("return new LinkedQueueAtomicNode<E>(e);"));
        assert!(text.contains(
            "protected E getSingleConsumerNodeValue(LinkedQueueAtomicNode<E> currConsumerNode, LinkedQueueAtomicNode<E> nextNode)"
        ));
    }

    #[test]
    fn imports_are_normalized() {
        let unit = generate_fixture("BaseLinkedQueue.java");
        let text = &unit.text;
        assert!(!text.contains("import static org.jctools.util.Unsafe"));
        assert_eq!(
            text.matches("import java.util.concurrent.atomic.AtomicReferenceFieldUpdater;").count(),
            1
        );
        assert_eq!(text.matches("import org.jctools.queues.MessagePassingQueue;").count(), 1);
        assert!(text.contains("import java.util.AbstractQueue;\nimport java.util.Iterator;\nimport java.util.concurrent.atomic.AtomicReferenceFieldUpdater;"));
    }

    #[test]
    fn every_class_carries_the_notice() {
        let unit = generate_fixture("BaseLinkedQueue.java");
        assert_eq!(
            unit.text
                .matches("The original source file is BaseLinkedQueue.java.")
                .count(),
            5
        );
        assert!(unit.text.contains(
            "The original source file is BaseLinkedQueue.java.\n *\n * A base data structure for concurrent linked queues.\n */\nabstract class BaseLinkedAtomicQueue<E>"
        ));
        assert!(unit.text.starts_with("/*\n * Licensed under the Apache License"));
        assert_eq!(unit.stats.classes, 5);
    }
}

mod mpsc_linked_queue {
    use super::*;

    #[test]
    fn special_class_is_final_and_concrete() {
        let unit = generate_fixture("MpscLinkedQueue.java");
        assert!(unit
            .text
            .contains("public final class MpscLinkedAtomicQueue<E> extends BaseLinkedAtomicQueue<E>"));
        assert!(!unit.text.contains("abstract"));
    }

    #[test]
    fn constructor_and_static_references_are_renamed() {
        let unit = generate_fixture("MpscLinkedQueue.java");
        assert!(unit.text.contains("    public MpscLinkedAtomicQueue()\n"));
        assert!(unit.text.contains("return MpscLinkedAtomicQueue.UNBOUNDED_CAPACITY;"));
        assert!(unit
            .text
            .contains("final LinkedQueueAtomicNode<E> prevProducerNode = xchgProducerNode(nextNode);"));
    }

    #[test]
    fn removed_import_slot_receives_additions() {
        let unit = generate_fixture("MpscLinkedQueue.java");
        assert!(unit.text.starts_with(
            "package org.jctools.queues.atomic;\n\nimport java.util.concurrent.atomic.AtomicReferenceFieldUpdater;\nimport org.jctools.queues.MessagePassingQueue;\n\n/**\n * NOTE: This class was automatically generated by"
        ));
        assert!(!unit.text.contains("UnsafeAccess"));
    }
}

// ============================================================================
// Failures
// ============================================================================

mod failures {
    use super::*;

    #[test]
    fn unknown_accessor_prefix_aborts() {
        let src = "\
package org.jctools.queues;

// $gen:ordered-fields
abstract class SpscLinkedQueueFooRef<E> {
    private int foo;

    final int zzFoo() {
        return foo;
    }
}
";
        let err = generate_source("SpscLinkedQueueFooRef.java", src).unwrap_err();
        match err {
            GenError::UnrecognizedAccessorConvention { class, method, prefix } => {
                assert_eq!(class, "SpscLinkedAtomicQueueFooRef");
                assert_eq!(method, "zzFoo");
                assert_eq!(prefix, "zz");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_source_aborts() {
        let err = generate_source("Bad.java", "public class Bad {\n    void f( {\n}\n").unwrap_err();
        assert!(matches!(err, GenError::Parse { .. }));
    }
}
