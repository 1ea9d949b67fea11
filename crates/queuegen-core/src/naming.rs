//! Naming rules between the unsafe and atomic queue families.
//!
//! Queue-family identifiers look like `<Prefix>LinkedQueue<Suffix>`, where the
//! prefix is one of the five family prefixes. The atomic counterpart swaps the
//! `LinkedQueue` infix for `LinkedAtomicQueue`. Anything else passes through
//! unchanged, which also makes translation idempotent.

/// The queue-family prefixes recognized by [`translate_queue_name`].
pub const FAMILY_PREFIXES: [&str; 5] = ["Spsc", "Spmc", "Mpsc", "Mpmc", "Base"];

/// Infix marking an unsafe-family linked queue.
pub const UNSAFE_INFIX: &str = "LinkedQueue";

/// Infix marking an atomic-family linked queue.
pub const ATOMIC_INFIX: &str = "LinkedAtomicQueue";

/// Supertype names with a fixed atomic counterpart, checked before the general rule.
const SUPERTYPE_SPECIAL_CASES: [(&str, &str); 1] = [("BaseLinkedQueue", "BaseLinkedAtomicQueue")];

/// The node type used by the unsafe family.
pub const PLAIN_NODE_TYPE: &str = "LinkedQueueNode";

/// The node type used by the atomic family.
pub const ATOMIC_NODE_TYPE: &str = "LinkedQueueAtomicNode";

/// The generic parameter carried by the atomic node type.
pub const NODE_TYPE_PARAMETER: &str = "E";

/// Translate a queue-family identifier to its atomic counterpart.
///
/// ```
/// use queuegen_core::naming::translate_queue_name;
///
/// assert_eq!(translate_queue_name("MpscLinkedQueue"), "MpscLinkedAtomicQueue");
/// assert_eq!(translate_queue_name("SpscLinkedQueueConsumerNodeRef"), "SpscLinkedAtomicQueueConsumerNodeRef");
/// assert_eq!(translate_queue_name("Foo"), "Foo");
/// ```
pub fn translate_queue_name(name: &str) -> String {
    if name.len() < 5 || !name.is_char_boundary(4) {
        return name.to_string();
    }

    let (start, end) = name.split_at(4);
    if !FAMILY_PREFIXES.contains(&start) {
        return name.to_string();
    }
    match end.strip_prefix(UNSAFE_INFIX) {
        Some(suffix) => format!("{start}{ATOMIC_INFIX}{suffix}"),
        None => name.to_string(),
    }
}

/// Translate a name used in `extends` or `implements`.
///
/// Fixed special cases take precedence over [`translate_queue_name`].
pub fn translate_supertype_name(name: &str) -> String {
    SUPERTYPE_SPECIAL_CASES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| translate_queue_name(name))
}

/// Translate a source file name, keeping (or supplying) the `.java` extension.
///
/// ```
/// use queuegen_core::naming::translate_file_name;
///
/// assert_eq!(translate_file_name("MpmcLinkedQueue.java"), "MpmcLinkedAtomicQueue.java");
/// ```
pub fn translate_file_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".java").unwrap_or(file_name);
    format!("{}.java", translate_queue_name(stem))
}

/// Uppercase the first character of an identifier.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The two node fields an atomic updater can be synthesized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// The `producerNode` field.
    Producer,
    /// The `consumerNode` field.
    Consumer,
}

impl NodeRole {
    /// Resolve the role of a field by its name.
    pub fn from_field_name(field: &str) -> Option<NodeRole> {
        match field {
            "producerNode" => Some(NodeRole::Producer),
            "consumerNode" => Some(NodeRole::Consumer),
            _ => None,
        }
    }

    /// Name of the field this role refers to.
    pub fn field_name(self) -> &'static str {
        match self {
            NodeRole::Producer => "producerNode",
            NodeRole::Consumer => "consumerNode",
        }
    }

    /// Name of the synthesized updater field.
    pub fn updater_name(self) -> &'static str {
        match self {
            NodeRole::Producer => "P_NODE_UPDATER",
            NodeRole::Consumer => "C_NODE_UPDATER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod translate_queue_name_tests {
        use super::*;

        #[test]
        fn family_names_translate() {
            assert_eq!(
                translate_queue_name("MpscLinkedQueue"),
                "MpscLinkedAtomicQueue"
            );
            assert_eq!(
                translate_queue_name("BaseLinkedQueue"),
                "BaseLinkedAtomicQueue"
            );
            assert_eq!(
                translate_queue_name("SpmcLinkedQueue"),
                "SpmcLinkedAtomicQueue"
            );
        }

        #[test]
        fn suffix_is_preserved() {
            assert_eq!(
                translate_queue_name("BaseLinkedQueueProducerNodeRef"),
                "BaseLinkedAtomicQueueProducerNodeRef"
            );
            assert_eq!(
                translate_queue_name("BaseLinkedQueuePad2"),
                "BaseLinkedAtomicQueuePad2"
            );
        }

        #[test]
        fn short_names_pass_through() {
            assert_eq!(translate_queue_name("Foo"), "Foo");
            assert_eq!(translate_queue_name("Mpsc"), "Mpsc");
            assert_eq!(translate_queue_name(""), "");
        }

        #[test]
        fn unknown_prefix_passes_through() {
            assert_eq!(translate_queue_name("XpscLinkedQueue"), "XpscLinkedQueue");
            assert_eq!(
                translate_queue_name("MessagePassingQueue"),
                "MessagePassingQueue"
            );
        }

        #[test]
        fn missing_infix_passes_through() {
            assert_eq!(translate_queue_name("MpscArrayQueue"), "MpscArrayQueue");
            assert_eq!(translate_queue_name("MpscLinked"), "MpscLinked");
        }

        #[test]
        fn translation_is_idempotent() {
            for name in [
                "MpscLinkedQueue",
                "BaseLinkedQueueConsumerNodeRef",
                "LinkedQueueNode",
                "Foo",
                "MpmcLinkedAtomicQueue",
                "Queue",
            ] {
                let once = translate_queue_name(name);
                assert_eq!(translate_queue_name(&once), once, "name: {name}");
            }
        }

        #[test]
        fn non_family_names_are_fixed_points() {
            for name in ["LinkedQueueNode", "AbstractQueue", "E", "Mpsc_LinkedQueue"] {
                assert_eq!(translate_queue_name(name), name);
            }
        }

        #[test]
        fn multibyte_names_do_not_panic() {
            assert_eq!(translate_queue_name("Mpsé€LinkedQueue"), "Mpsé€LinkedQueue");
        }
    }

    mod supertype_tests {
        use super::*;

        #[test]
        fn special_case_applies_first() {
            assert_eq!(
                translate_supertype_name("BaseLinkedQueue"),
                "BaseLinkedAtomicQueue"
            );
        }

        #[test]
        fn general_rule_applies_otherwise() {
            assert_eq!(
                translate_supertype_name("MpscLinkedQueuePad1"),
                "MpscLinkedAtomicQueuePad1"
            );
            assert_eq!(
                translate_supertype_name("AbstractQueue"),
                "AbstractQueue"
            );
        }
    }

    mod file_name_tests {
        use super::*;

        #[test]
        fn java_extension_is_reappended() {
            assert_eq!(
                translate_file_name("MpmcLinkedQueue.java"),
                "MpmcLinkedAtomicQueue.java"
            );
        }

        #[test]
        fn missing_extension_is_supplied() {
            assert_eq!(
                translate_file_name("SpscLinkedQueue"),
                "SpscLinkedAtomicQueue.java"
            );
        }

        #[test]
        fn unrelated_file_keeps_name() {
            assert_eq!(translate_file_name("Pow2.java"), "Pow2.java");
        }
    }

    mod node_role_tests {
        use super::*;

        #[test]
        fn roles_resolve_from_field_names() {
            assert_eq!(
                NodeRole::from_field_name("producerNode"),
                Some(NodeRole::Producer)
            );
            assert_eq!(
                NodeRole::from_field_name("consumerNode"),
                Some(NodeRole::Consumer)
            );
            assert_eq!(NodeRole::from_field_name("head"), None);
        }

        #[test]
        fn updater_names_are_fixed() {
            assert_eq!(NodeRole::Producer.updater_name(), "P_NODE_UPDATER");
            assert_eq!(NodeRole::Consumer.updater_name(), "C_NODE_UPDATER");
            assert_eq!(NodeRole::Consumer.field_name(), "consumerNode");
        }

        #[test]
        fn capitalize_first_letter() {
            assert_eq!(capitalize("producerNode"), "ProducerNode");
            assert_eq!(capitalize(""), "");
        }
    }
}
