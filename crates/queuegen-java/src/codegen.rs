//! Java fragments inserted by the rewrite passes.
//!
//! Each helper renders one syntactic construct as text, indented for the
//! place it will be spliced into.

use queuegen_core::naming::{NodeRole, ATOMIC_NODE_TYPE, NODE_TYPE_PARAMETER};

/// One level of indentation in generated code.
pub const INDENT_LEVEL: &str = "    ";

/// Parameter name carrying the value to store.
pub const NEW_VALUE: &str = "newValue";

/// Parameter name carrying the expected value of a compare-and-set.
pub const EXPECT: &str = "expect";

/// Name of the synthesized exchange accessor.
pub const EXCHANGE_METHOD: &str = "xchgProducerNode";

/// Import of the atomic field updater primitive.
pub const FIELD_UPDATER_IMPORT: &str = "java.util.concurrent.atomic.AtomicReferenceFieldUpdater";

/// Import of the cross-cutting queue interface.
pub const QUEUE_INTERFACE_IMPORT: &str = "org.jctools.queues.MessagePassingQueue";

/// `LinkedQueueAtomicNode<E>`
pub fn atomic_node_type() -> String {
    format!("{ATOMIC_NODE_TYPE}<{NODE_TYPE_PARAMETER}>")
}

/// A block holding one statement, closed at `indent`.
fn block(indent: &str, statement: &str) -> String {
    format!("{{\n{indent}{INDENT_LEVEL}{statement}\n{indent}}}")
}

/// `{ U.lazySet(this, newValue); }`
pub fn lazy_set_body(updater: &str, indent: &str) -> String {
    block(indent, &format!("{updater}.lazySet(this, {NEW_VALUE});"))
}

/// `{ return U.compareAndSet(this, expect, newValue); }`
pub fn compare_and_set_body(updater: &str, indent: &str) -> String {
    block(
        indent,
        &format!("return {updater}.compareAndSet(this, {EXPECT}, {NEW_VALUE});"),
    )
}

/// `{ field = newValue; }`
pub fn assignment_body(field: &str, indent: &str) -> String {
    block(indent, &format!("{field} = {NEW_VALUE};"))
}

/// `{ return field; }`
pub fn return_field_body(field: &str, indent: &str) -> String {
    block(indent, &format!("return {field};"))
}

/// The static updater bound to `role`'s field of `class_name`.
///
/// ```
/// use queuegen_core::naming::NodeRole;
/// use queuegen_java::codegen::updater_field;
///
/// assert_eq!(
///     updater_field("Foo", NodeRole::Consumer),
///     "private static final AtomicReferenceFieldUpdater<Foo, LinkedQueueAtomicNode> C_NODE_UPDATER = \
///      AtomicReferenceFieldUpdater.newUpdater(Foo.class, LinkedQueueAtomicNode.class, \"consumerNode\");"
/// );
/// ```
pub fn updater_field(class_name: &str, role: NodeRole) -> String {
    format!(
        "private static final AtomicReferenceFieldUpdater<{class_name}, {ATOMIC_NODE_TYPE}> {} = \
         AtomicReferenceFieldUpdater.newUpdater({class_name}.class, {ATOMIC_NODE_TYPE}.class, \"{}\");",
        role.updater_name(),
        role.field_name()
    )
}

/// The producer-node exchange accessor, declared at `indent`.
pub fn exchange_method(indent: &str) -> String {
    let node = atomic_node_type();
    let body = block(
        indent,
        &format!(
            "return {}.getAndSet(this, {NEW_VALUE});",
            NodeRole::Producer.updater_name()
        ),
    );
    format!("protected final {node} {EXCHANGE_METHOD}({node} {NEW_VALUE}) {body}")
}

/// A javadoc comment at `indent` with `lines` ahead of any `existing` content.
///
/// `existing` is the inside of a previous javadoc (between `/**` and `*/`).
pub fn javadoc(indent: &str, lines: &[String], existing: Option<&str>) -> String {
    let mut out = String::from("/**\n");
    for line in lines {
        out.push_str(&format!("{indent} * {line}\n"));
    }
    match existing {
        Some(content) => {
            out.push_str(&format!("{indent} *"));
            out.push_str(content);
        }
        None => out.push_str(&format!("{indent} ")),
    }
    out.push_str("*/");
    out
}

/// The generated-file notice naming the generator and the originating file.
pub fn generated_notice(generator: &str, module: &str, source_file: &str) -> Vec<String> {
    vec![
        format!("NOTE: This class was automatically generated by {generator}"),
        format!(
            "which can be found in the {module} module. The original source file is {source_file}."
        ),
    ]
}

/// `import name;`
pub fn import_line(name: &str) -> String {
    format!("import {name};")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_are_indented_blocks() {
        assert_eq!(
            lazy_set_body("P_NODE_UPDATER", "    "),
            "{\n        P_NODE_UPDATER.lazySet(this, newValue);\n    }"
        );
        assert_eq!(
            compare_and_set_body("C_NODE_UPDATER", ""),
            "{\n    return C_NODE_UPDATER.compareAndSet(this, expect, newValue);\n}"
        );
        assert_eq!(
            assignment_body("producerNode", ""),
            "{\n    producerNode = newValue;\n}"
        );
        assert_eq!(
            return_field_body("consumerNode", ""),
            "{\n    return consumerNode;\n}"
        );
    }

    #[test]
    fn updater_field_binds_class_and_field() {
        let field = updater_field("BaseLinkedAtomicQueueProducerNodeRef", NodeRole::Producer);
        assert!(field.starts_with(
            "private static final AtomicReferenceFieldUpdater<BaseLinkedAtomicQueueProducerNodeRef, LinkedQueueAtomicNode> P_NODE_UPDATER"
        ));
        assert!(field.ends_with(
            "newUpdater(BaseLinkedAtomicQueueProducerNodeRef.class, LinkedQueueAtomicNode.class, \"producerNode\");"
        ));
    }

    #[test]
    fn exchange_method_uses_get_and_set() {
        assert_eq!(
            exchange_method("    "),
            "protected final LinkedQueueAtomicNode<E> xchgProducerNode(LinkedQueueAtomicNode<E> newValue) {\n        return P_NODE_UPDATER.getAndSet(this, newValue);\n    }"
        );
    }

    #[test]
    fn fresh_javadoc() {
        let lines = vec!["one".to_string(), "two".to_string()];
        assert_eq!(javadoc("", &lines, None), "/**\n * one\n * two\n */");
    }

    #[test]
    fn merged_javadoc_keeps_existing_content() {
        let lines = vec!["notice".to_string()];
        assert_eq!(
            javadoc("", &lines, Some("\n * Original.\n ")),
            "/**\n * notice\n *\n * Original.\n */"
        );
    }

    #[test]
    fn notice_names_generator_and_source() {
        let lines = generated_notice("gen", "jctools-build", "MpscLinkedQueue.java");
        assert_eq!(lines[0], "NOTE: This class was automatically generated by gen");
        assert!(lines[1].ends_with("The original source file is MpscLinkedQueue.java."));
    }
}
