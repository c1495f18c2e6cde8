//! Declaration extraction tests against the public library API

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use swiftcube::{
    extract, DeclarationExtractor, DeclarationKind, DeclarationRecord, ExtractError, MemberScope,
};
use yare::parameterized;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/swift")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

#[parameterized(
    struct_one_line = { "struct Point: Equatable, Hashable { var x: Int; var y: Int }", DeclarationKind::ValueType, "Point" },
    class_empty = { "class Animal { }", DeclarationKind::ReferenceType, "Animal" },
    final_class = { "public final class Store {}", DeclarationKind::ReferenceType, "Store" },
    generic_struct = { "struct Box<T>: Codable {\n    let value: T\n}", DeclarationKind::ValueType, "Box" },
    after_imports = { "import UIKit\n\nclass View: UIView {}", DeclarationKind::ReferenceType, "View" },
    keyword_in_comment_first = { "// class Fake\nstruct Real {}", DeclarationKind::ValueType, "Real" },
)]
fn test_kind_and_name(source: &str, kind: DeclarationKind, name: &str) {
    let record = extract(source).unwrap();
    assert_eq!(record.kind, kind);
    assert_eq!(record.name, name);
}

#[parameterized(
    two_conformances = { "struct Point: Equatable, Hashable { }", &["Equatable", "Hashable"] },
    none = { "class Animal { }", &[] },
    superclass_and_protocol = { "class Dog: Animal, Codable {}", &["Animal", "Codable"] },
    generic_params_skipped = { "struct Box<T>: Codable {}", &["Codable"] },
    generic_supertype = { "class Cache: Base<String, Int>, Sendable {}", &["Base<String, Int>", "Sendable"] },
    where_clause_removed = { "struct Pair<A, B>: Equatable where A: Equatable, B: Equatable {}", &["Equatable"] },
    trailing_comment = { "struct S: P, Q // notes, more\n{}", &["P", "Q"] },
)]
fn test_supertypes(source: &str, expected: &[&str]) {
    let record = extract(source).unwrap();
    assert_eq!(record.supertypes, expected);
}

#[parameterized(
    plain = { "func speak() -> String", "speak() -> String" },
    no_return = { "func reset()", "reset()" },
    labeled_params = { "func move(to point: Point, animated: Bool)", "move(to point: Point, animated: Bool)" },
    effects = { "func load() async throws -> Data", "load() async throws -> Data" },
    generic = { "static func make<T: Decodable>(from data: Data) throws -> T", "make<T: Decodable>(from data: Data) throws -> T" },
    dictionary_return = { "func counts() -> [String: Int]", "counts() -> [String: Int]" },
    closure_param = { "func each(_ body: (Int) -> Void)", "each(_ body: (Int) -> Void)" },
)]
fn test_method_signatures(line: &str, expected: &str) {
    let source = format!("class C {{\n    {}\n}}", line);
    let record = extract(&source).unwrap();
    assert_eq!(record.methods, vec![expected.to_string()]);
    assert!(record.initializers.is_empty());
}

#[parameterized(
    plain = { "init(name: String)", "init(name: String)" },
    empty = { "init()", "init()" },
    failable = { "init?(rawValue: Int)", "init(rawValue: Int)" },
    implicitly_unwrapped = { "init!(coder: NSCoder)", "init(coder: NSCoder)" },
    convenience = { "convenience init(x: Int)", "init(x: Int)" },
    required_public = { "required public init(from decoder: Decoder) throws", "init(from decoder: Decoder)" },
)]
fn test_initializer_signatures(line: &str, expected: &str) {
    let source = format!("class C {{\n    {} {{ }}\n}}", line);
    let record = extract(&source).unwrap();
    assert_eq!(record.initializers, vec![expected.to_string()]);
    assert!(record.methods.is_empty());
}

#[test]
fn test_point_fixture() {
    let record = extract(&fixture("Point.swift")).unwrap();
    assert_eq!(
        record,
        DeclarationRecord {
            kind: DeclarationKind::ValueType,
            name: "Point".to_string(),
            supertypes: vec!["Equatable".to_string(), "Hashable".to_string()],
            properties: vec!["var x: Int".to_string(), "var y: Int".to_string()],
            methods: vec![],
            initializers: vec![],
        }
    );
}

#[test]
fn test_animal_fixture() {
    let record = extract(&fixture("Animal.swift")).unwrap();
    assert_eq!(record.kind, DeclarationKind::ReferenceType);
    assert!(record.supertypes.is_empty());
    assert_eq!(record.properties, vec!["var name: String"]);
    assert_eq!(record.methods, vec!["speak() -> String"]);
    assert_eq!(record.initializers, vec!["init(name: String)"]);
}

#[test]
fn test_repository_fixture_top_level() {
    let record = extract(&fixture("Repository.swift")).unwrap();

    assert_eq!(record.kind, DeclarationKind::ReferenceType);
    assert_eq!(record.name, "Repository");
    assert_eq!(record.supertypes, vec!["BaseStore<Item>", "ObservableObject"]);
    assert_eq!(
        record.properties,
        vec![
            "@Published private(set) var items: [Item] = []",
            "private let session: URLSession",
            "static let shared = Repository<String>(session: .shared)",
            "var count: Int",
        ]
    );
    assert_eq!(
        record.methods,
        vec![
            "fetch(from url: URL, retries: Int = 3) async throws -> [Item]",
            "clear() -> Int",
            "map<T>(_ transform: (Item) throws -> T) rethrows -> [T]",
        ]
    );
    assert_eq!(
        record.initializers,
        vec![
            "init(session: URLSession)",
            "init(configuration: URLSessionConfiguration?)",
        ]
    );
}

#[test]
fn test_repository_fixture_any_depth() {
    let extractor = DeclarationExtractor::with_scope(MemberScope::AnyDepth);
    let record = extractor.extract(&fixture("Repository.swift")).unwrap();

    assert!(record
        .properties
        .contains(&"let total = items.count".to_string()));
    assert!(record.properties.contains(&"let index: Int".to_string()));
    assert!(record.methods.contains(&"next() -> Page".to_string()));
    assert_eq!(record.initializers.len(), 2);
}

#[test]
fn test_no_declaration_in_fixture() {
    assert_eq!(
        extract(&fixture("Empty.swift")),
        Err(ExtractError::NoDeclarationFound)
    );
}

#[test]
fn test_name_not_found() {
    assert_eq!(
        extract("class {\n  var x = 1\n}"),
        Err(ExtractError::NameNotFound { keyword: "class" })
    );
}

#[test]
fn test_extraction_is_idempotent() {
    let source = fixture("Repository.swift");
    assert_eq!(extract(&source).unwrap(), extract(&source).unwrap());
}

#[test]
fn test_concurrent_extraction() {
    let extractor = Arc::new(DeclarationExtractor::new());
    let sources = Arc::new(vec![
        fixture("Point.swift"),
        fixture("Animal.swift"),
        fixture("Repository.swift"),
    ]);
    let expected: Vec<DeclarationRecord> = sources.iter().map(|s| extract(s).unwrap()).collect();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let extractor = Arc::clone(&extractor);
            let sources = Arc::clone(&sources);
            thread::spawn(move || {
                (0..25)
                    .map(|i| {
                        let idx = (t + i) % sources.len();
                        (idx, extractor.extract(&sources[idx]).unwrap())
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for (idx, record) in handle.join().unwrap() {
            assert_eq!(record, expected[idx]);
        }
    }
}
