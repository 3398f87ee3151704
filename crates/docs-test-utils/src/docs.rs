//! Valid documents for each type.
//!
//! Every builder produces a document that passes all validation phases,
//! so a test only needs to break the one thing it is checking.

/// Project id used by every fixture.
pub const PROJECT_ID: &str = "my-project";

/// Minimal `docs-project.yaml`.
pub const PROJECT_CONFIG: &str = "project:\n  id: my-project\n  name: My Project\n";

/// A distinct, valid lowercase UUIDv4 per `n`.
pub fn uuid(n: u32) -> String {
    format!("7c9e6679-7425-40de-944b-{n:012x}")
}

/// A valid ADR numbered `number`.
pub fn adr(number: u32, title: &str, body: &str) -> String {
    format!(
        "---\n\
         title: {title}\n\
         status: Accepted\n\
         date: 2025-10-13\n\
         deciders: Core Team\n\
         tags: [architecture]\n\
         id: adr-{number:03}\n\
         project_id: {PROJECT_ID}\n\
         doc_uuid: {}\n\
         ---\n\
         {body}",
        uuid(number)
    )
}

/// A valid RFC numbered `number`.
pub fn rfc(number: u32, title: &str, body: &str) -> String {
    format!(
        "---\n\
         title: {title}\n\
         status: Draft\n\
         author: Platform Team\n\
         created: 2025-10-13\n\
         tags: [api]\n\
         id: rfc-{number:03}\n\
         project_id: {PROJECT_ID}\n\
         doc_uuid: {}\n\
         ---\n\
         {body}",
        uuid(100 + number)
    )
}

/// A valid memo numbered `number`.
pub fn memo(number: u32, title: &str, body: &str) -> String {
    format!(
        "---\n\
         title: {title}\n\
         author: Platform Team\n\
         created: 2025-10-13\n\
         updated: 2025-10-14\n\
         tags: [planning]\n\
         id: memo-{number:03}\n\
         project_id: {PROJECT_ID}\n\
         doc_uuid: {}\n\
         ---\n\
         {body}",
        uuid(200 + number)
    )
}

/// A valid PRD numbered `number`.
pub fn prd(number: u32, title: &str, body: &str) -> String {
    format!(
        "---\n\
         title: {title}\n\
         status: Approved\n\
         author: Product Team\n\
         created: 2025-10-13\n\
         updated: 2025-10-14\n\
         target_release: 2.1\n\
         tags: [product]\n\
         id: prd-{number:03}\n\
         project_id: {PROJECT_ID}\n\
         doc_uuid: {}\n\
         ---\n\
         {body}",
        uuid(300 + number)
    )
}

/// A valid FRD numbered `number`.
pub fn frd(number: u32, title: &str, body: &str) -> String {
    format!(
        "---\n\
         title: {title}\n\
         status: Draft\n\
         author: Product Team\n\
         created: 2025-10-13\n\
         tags: [feature]\n\
         id: frd-{number:03}\n\
         project_id: {PROJECT_ID}\n\
         doc_uuid: {}\n\
         ---\n\
         {body}",
        uuid(400 + number)
    )
}

/// A valid PRD-FAQ numbered `number`.
pub fn prdfaq(number: u32, title: &str, body: &str) -> String {
    format!(
        "---\n\
         title: {title}\n\
         status: In Review\n\
         author: Product Team\n\
         created: 2025-10-13\n\
         tags: [launch]\n\
         id: prdfaq-{number:03}\n\
         project_id: {PROJECT_ID}\n\
         doc_uuid: {}\n\
         ---\n\
         {body}",
        uuid(500 + number)
    )
}

/// A valid generic page.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "---\n\
         title: {title}\n\
         sidebar_position: 1\n\
         project_id: {PROJECT_ID}\n\
         doc_uuid: {}\n\
         ---\n\
         {body}",
        uuid(600)
    )
}
