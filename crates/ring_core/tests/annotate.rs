use pretty_assertions::assert_eq;
use ring_core::{annotate, parse_json, parse_yaml, DocumentTree, Mapping, Scalar};

fn yaml(text: &str) -> Mapping {
    parse_yaml(text.as_bytes()).unwrap()
}

fn scalar_at<'a>(tree: &'a DocumentTree, path: &[&str]) -> &'a Scalar {
    tree.pointer(path).and_then(DocumentTree::as_scalar).unwrap()
}

#[test]
fn non_string_keys_become_strings() {
    let annotated = annotate(yaml("200: ok\ntrue: yes\n1.5: half\n~: nothing\n"));
    let keys: Vec<_> = annotated.keys().cloned().collect();
    assert_eq!(
        keys,
        vec![
            Scalar::String("200".into()),
            Scalar::String("true".into()),
            Scalar::String("1.5".into()),
            Scalar::String("null".into()),
        ]
    );
    assert!(annotated.keys().all(|key| matches!(key, Scalar::String(_))));
}

#[test]
fn colliding_keys_are_merged() {
    let mut responses = Mapping::new();
    responses.insert(
        Scalar::Int(200),
        DocumentTree::Mapping(yaml("content: {application/json: {}}")),
    );
    responses.insert(
        Scalar::from("200"),
        DocumentTree::Mapping(yaml("headers: {X-Rate: {}}")),
    );
    let mut root = Mapping::new();
    root.insert(Scalar::from("responses"), DocumentTree::Mapping(responses));

    let annotated = DocumentTree::Mapping(annotate(root));
    let ok = annotated.pointer(&["responses", "200"]).unwrap().as_mapping().unwrap();
    assert_eq!(ok.len(), 2);
    assert!(ok.get_str("content").is_some());
    assert!(ok.get_str("headers").is_some());
}

#[test]
fn ref_and_description_are_quoted_at_every_depth() {
    let source = yaml(
        r##"
description: top
info:
  description: nested
paths:
  /pets:
    get:
      parameters:
        - $ref: "#/components/parameters/limit"
        - name: offset
          description: 10
      responses:
        200:
          description: ok
          content:
            application/json:
              schema: {$ref: "#/components/schemas/Pets"}
"##,
    );
    let annotated = DocumentTree::Mapping(annotate(source));

    assert!(matches!(scalar_at(&annotated, &["description"]), Scalar::Quoted(t) if t == "top"));
    assert!(matches!(
        scalar_at(&annotated, &["info", "description"]),
        Scalar::Quoted(t) if t == "nested"
    ));
    let parameters = annotated
        .pointer(&["paths", "/pets", "get", "parameters"])
        .and_then(DocumentTree::as_sequence)
        .unwrap();
    assert!(matches!(
        scalar_at(&parameters[0], &["$ref"]),
        Scalar::Quoted(t) if t == "#/components/parameters/limit"
    ));
    assert!(matches!(
        scalar_at(&parameters[1], &["description"]),
        Scalar::Quoted(t) if t == "10"
    ));
    assert!(matches!(scalar_at(&parameters[1], &["name"]), Scalar::String(_)));
    assert!(matches!(
        scalar_at(
            &annotated,
            &["paths", "/pets", "get", "responses", "200", "content", "application/json", "schema", "$ref"]
        ),
        Scalar::Quoted(t) if t == "#/components/schemas/Pets"
    ));
}

#[test]
fn null_description_stays_null_and_mappings_are_walked() {
    let annotated = DocumentTree::Mapping(annotate(yaml(
        "a:\n  description: ~\nb:\n  description:\n    description: inner\n",
    )));
    assert_eq!(scalar_at(&annotated, &["a", "description"]), &Scalar::Null);
    assert!(matches!(
        scalar_at(&annotated, &["b", "description", "description"]),
        Scalar::Quoted(t) if t == "inner"
    ));
}

#[test]
fn annotation_does_not_change_equality() {
    let source = parse_json(br##"{"schema": {"$ref": "#/a"}, "description": "d"}"##).unwrap();
    assert_eq!(annotate(source.clone()), source);
}
