use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use folio_core::FolioError;
use folio_core::{search, tags, toc};

use crate::WebState;
use crate::dto::{
    AskRequest, AskResponse, DocListing, DocRef, DocsResponse, DocumentResponse, ReloadResponse,
    SearchQuery, SearchResponse, SearchResult, SiteResponse, TagResponse, TagsResponse,
};
use crate::error::folio_error_response;
use crate::html::{INDEX_CSS, INDEX_HTML, INDEX_JS};

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn index_css() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        INDEX_CSS,
    )
        .into_response()
}

pub async fn index_js() -> Response {
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        INDEX_JS,
    )
        .into_response()
}

pub async fn site(State(state): State<WebState>) -> Json<SiteResponse> {
    Json(SiteResponse {
        title: state.site.title.clone(),
        homepage: state.site.homepage.clone(),
        giscus: state.site.giscus.clone(),
        assistant_enabled: state.assistant.is_enabled(),
    })
}

pub async fn list_docs(State(state): State<WebState>) -> Json<DocsResponse> {
    let store = state.store.read().await;
    let documents = store
        .documents()
        .iter()
        .map(DocListing::from_document)
        .collect();
    Json(DocsResponse { documents })
}

pub async fn get_doc(State(state): State<WebState>, Path(slug): Path<String>) -> Response {
    let store = state.store.read().await;
    let Some(doc) = store.get(&slug) else {
        return folio_error_response(FolioError::NotFound(slug.clone()), "doc.get", Some(slug));
    };
    let (previous, next) = store.adjacent(&slug);

    let response = DocumentResponse {
        slug: doc.slug.clone(),
        title: doc.title().to_string(),
        meta: doc.meta.clone(),
        content: doc.content.clone(),
        html: doc.html.clone(),
        toc: toc::extract_toc(&doc.content),
        etag: doc.etag.clone(),
        modified: doc.modified,
        previous: previous.map(DocRef::from_document),
        next: next.map(DocRef::from_document),
    };
    (StatusCode::OK, Json(response)).into_response()
}

pub async fn categories(
    State(state): State<WebState>,
) -> Json<BTreeMap<String, Vec<DocListing>>> {
    let store = state.store.read().await;
    let categories = store
        .by_category()
        .into_iter()
        .map(|(category, docs)| {
            let listings = docs.iter().map(|doc| DocListing::from_document(doc)).collect();
            (category, listings)
        })
        .collect();
    Json(categories)
}

pub async fn list_tags(State(state): State<WebState>) -> Json<TagsResponse> {
    let store = state.store.read().await;
    Json(TagsResponse {
        tags: tags::tag_counts(store.documents()),
    })
}

/// Resolve a tag query, escalating through exact, case-insensitive, and
/// fuzzy matching. A miss is a 200 with empty documents plus similar-tag
/// suggestions, never an error.
pub async fn resolve_tag(State(state): State<WebState>, Path(tag): Path<String>) -> Json<TagResponse> {
    let store = state.store.read().await;
    let docs = store.documents();

    let matched = tags::resolve_tag(docs, &tag);
    let suggestions = if matched.documents.is_empty() {
        tags::similar_tags(&tags::all_tags(docs), &tag)
    } else {
        Vec::new()
    };

    Json(TagResponse {
        tag,
        strategy: matched.strategy.map(tags::MatchStrategy::as_str),
        documents: matched
            .documents
            .iter()
            .map(|doc| DocListing::from_document(doc))
            .collect(),
        suggestions,
    })
}

pub async fn search(
    State(state): State<WebState>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let store = state.store.read().await;
    let results = search::search_docs(store.documents(), &query.q)
        .into_iter()
        .map(|hit| SearchResult {
            slug: hit.document.slug.clone(),
            title: hit.document.title().to_string(),
            excerpt: hit.document.excerpt.clone(),
            score: hit.score,
            snippet: hit.snippet,
        })
        .collect();
    Json(SearchResponse {
        query: query.q,
        results,
    })
}

pub async fn ask_assistant(
    State(state): State<WebState>,
    Json(request): Json<AskRequest>,
) -> Response {
    let (title, content) = {
        let store = state.store.read().await;
        let Some(doc) = store.get(&request.slug) else {
            return folio_error_response(
                FolioError::NotFound(request.slug.clone()),
                "assistant.ask",
                Some(request.slug),
            );
        };
        (doc.title().to_string(), doc.content.clone())
    };

    let assistant = state.assistant.clone();
    let slug = request.slug.clone();
    let answer = tokio::task::spawn_blocking(move || {
        assistant.ask(&title, &content, &request.question, &request.history)
    })
    .await;

    match answer {
        Ok(Ok(answer)) => (StatusCode::OK, Json(AskResponse { slug, answer })).into_response(),
        Ok(Err(err)) => folio_error_response(err, "assistant.ask", Some(slug)),
        Err(join_err) => folio_error_response(
            FolioError::Internal(format!("assistant task failed: {join_err}")),
            "assistant.ask",
            Some(slug),
        ),
    }
}

pub async fn reload(State(state): State<WebState>) -> Response {
    let mut store = state.store.write().await;
    if let Err(err) = store.reload() {
        return folio_error_response(err, "corpus.reload", None);
    }
    let response = ReloadResponse {
        documents: store.len(),
        tags: tags::all_tags(store.documents()).len(),
    };
    (StatusCode::OK, Json(response)).into_response()
}
