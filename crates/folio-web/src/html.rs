//! Embedded single-page UI served at `/`. Data comes from the JSON API;
//! KaTeX and highlight.js are loaded from a CDN for client-side math and
//! code rendering.

pub const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Folio</title>
  <link rel="stylesheet" href="/assets/index.css">
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/katex.min.css">
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/gh/highlightjs/cdn-release@11.10.0/build/styles/github.min.css">
</head>
<body>
  <header class="topbar">
    <a href="#/" class="brand" id="site-title">Folio</a>
    <form id="search-form">
      <input id="search-input" type="search" placeholder="Search docs..." autocomplete="off">
    </form>
    <nav>
      <a href="#/docs">Docs</a>
      <a href="#/tags">Tags</a>
    </nav>
  </header>
  <div class="layout">
    <aside id="sidebar"></aside>
    <main id="main"></main>
    <aside id="toc-panel" class="toc-panel"></aside>
  </div>
  <script src="https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/katex.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/contrib/auto-render.min.js"></script>
  <script src="https://cdn.jsdelivr.net/gh/highlightjs/cdn-release@11.10.0/build/highlight.min.js"></script>
  <script src="/assets/index.js"></script>
</body>
</html>
"##;

pub const INDEX_CSS: &str = r##"
:root {
  --fg: #1f2328;
  --muted: #656d76;
  --border: #d1d9e0;
  --accent: #0969da;
  --bg-subtle: #f6f8fa;
}
* { box-sizing: border-box; }
body {
  margin: 0;
  color: var(--fg);
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
  line-height: 1.6;
}
.topbar {
  display: flex;
  align-items: center;
  gap: 1rem;
  padding: 0.6rem 1.2rem;
  border-bottom: 1px solid var(--border);
  position: sticky;
  top: 0;
  background: #fff;
  z-index: 10;
}
.brand { font-weight: 700; color: var(--fg); text-decoration: none; }
.topbar nav a { margin-left: 0.8rem; color: var(--muted); text-decoration: none; }
.topbar nav a:hover { color: var(--accent); }
#search-form { flex: 1; max-width: 28rem; }
#search-input {
  width: 100%;
  padding: 0.35rem 0.7rem;
  border: 1px solid var(--border);
  border-radius: 6px;
}
.layout {
  display: grid;
  grid-template-columns: 16rem minmax(0, 1fr) 16rem;
  gap: 1.5rem;
  max-width: 80rem;
  margin: 0 auto;
  padding: 1.5rem 1.2rem;
}
#sidebar h3 {
  font-size: 0.75rem;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  color: var(--muted);
}
#sidebar ul { list-style: none; padding: 0; margin: 0 0 1rem; }
#sidebar a {
  display: block;
  padding: 0.2rem 0.4rem;
  color: var(--fg);
  text-decoration: none;
  border-radius: 4px;
}
#sidebar a:hover, #sidebar a.active { background: var(--bg-subtle); color: var(--accent); }
.toc-panel { font-size: 0.85rem; }
.toc-panel.hidden { display: none; }
.toc-panel a {
  display: block;
  color: var(--muted);
  text-decoration: none;
  padding: 0.15rem 0;
}
.toc-panel a.active { color: var(--accent); font-weight: 600; }
.doc-card {
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1rem 1.2rem;
  margin-bottom: 1rem;
}
.doc-card h3 { margin: 0 0 0.3rem; }
.doc-card p { margin: 0.3rem 0; color: var(--muted); }
.tag-badge {
  display: inline-block;
  background: var(--bg-subtle);
  border: 1px solid var(--border);
  border-radius: 999px;
  padding: 0 0.6rem;
  margin: 0 0.25rem 0.25rem 0;
  font-size: 0.8rem;
  color: var(--fg);
  text-decoration: none;
}
.tag-badge:hover { border-color: var(--accent); color: var(--accent); }
.notice {
  border: 1px solid var(--border);
  border-left: 4px solid var(--accent);
  background: var(--bg-subtle);
  border-radius: 6px;
  padding: 0.8rem 1rem;
  margin: 1rem 0;
}
.doc-nav { display: flex; justify-content: space-between; margin-top: 2rem; }
.doc-nav a { color: var(--accent); text-decoration: none; }
article pre {
  background: var(--bg-subtle);
  border-radius: 6px;
  padding: 0.8rem;
  overflow-x: auto;
}
article code { font-family: ui-monospace, "SFMono-Regular", monospace; font-size: 0.9em; }
article img { max-width: 100%; }
article blockquote {
  margin: 0;
  padding-left: 1rem;
  border-left: 3px solid var(--border);
  color: var(--muted);
}
.assistant {
  margin-top: 2rem;
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1rem;
}
.assistant textarea {
  width: 100%;
  min-height: 3rem;
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 0.5rem;
}
.assistant button {
  margin-top: 0.5rem;
  padding: 0.35rem 1rem;
  border: none;
  border-radius: 6px;
  background: var(--accent);
  color: #fff;
  cursor: pointer;
}
.assistant .answer { margin-top: 1rem; white-space: pre-wrap; }
.toc-toggle {
  position: fixed;
  right: 1rem;
  bottom: 1rem;
  border: 1px solid var(--border);
  border-radius: 999px;
  background: #fff;
  padding: 0.4rem 0.9rem;
  cursor: pointer;
}
@media (max-width: 72rem) {
  .layout { grid-template-columns: 14rem minmax(0, 1fr); }
  .toc-panel { display: none; }
}
"##;

pub const INDEX_JS: &str = r##"
"use strict";

const api = (path) => fetch(path).then((res) => {
  if (!res.ok) return res.json().then((body) => Promise.reject(body));
  return res.json();
});

// TOC visibility is explicit shared state with subscriber callbacks, not a
// module-level singleton flag.
function createTocState(initial) {
  let visible = initial;
  const listeners = new Set();
  return {
    get visible() { return visible; },
    set(value) {
      visible = value;
      listeners.forEach((fn) => fn(visible));
    },
    subscribe(fn) {
      listeners.add(fn);
      return () => listeners.delete(fn);
    },
  };
}

const app = {
  site: null,
  tocState: createTocState(true),
  observer: null,
};

const main = document.getElementById("main");
const sidebar = document.getElementById("sidebar");
const tocPanel = document.getElementById("toc-panel");

app.tocState.subscribe((visible) => {
  tocPanel.classList.toggle("hidden", !visible);
});

function esc(text) {
  const div = document.createElement("div");
  div.textContent = text == null ? "" : String(text);
  return div.innerHTML;
}

function docCard(doc, activeTag) {
  const tags = (doc.meta.tags || []).map((tag) => {
    const cls = tag === activeTag ? "tag-badge active" : "tag-badge";
    return `<a class="${cls}" href="#/tags/${encodeURIComponent(tag)}">${esc(tag)}</a>`;
  }).join("");
  const description = doc.meta.description ? `<p>${esc(doc.meta.description)}</p>` : "";
  return `<div class="doc-card">
    <h3><a href="#/docs/${encodeURIComponent(doc.slug)}">${esc(doc.title)}</a></h3>
    ${description}
    <div>${tags}</div>
  </div>`;
}

async function renderSidebar() {
  const categories = await api("/api/categories");
  sidebar.innerHTML = Object.entries(categories).map(([category, docs]) => {
    const items = docs.map((doc) =>
      `<li><a data-slug="${esc(doc.slug)}" href="#/docs/${encodeURIComponent(doc.slug)}">${esc(doc.title)}</a></li>`
    ).join("");
    return `<h3>${esc(category)}</h3><ul>${items}</ul>`;
  }).join("");
}

function markActive(slug) {
  sidebar.querySelectorAll("a").forEach((a) => {
    a.classList.toggle("active", a.dataset.slug === slug);
  });
}

async function renderHome() {
  const site = app.site;
  const hero = site.homepage.hero;
  const features = site.homepage.features.map((f) =>
    `<div class="doc-card"><h3>${esc(f.title)}</h3><p>${esc(f.description)}</p></div>`
  ).join("");
  tocPanel.innerHTML = "";
  main.innerHTML = `
    <h1>${esc(hero.title)}</h1>
    <p>${esc(hero.description)}</p>
    <p><a class="tag-badge" href="${esc(hero.primary_button?.href || "#/docs")}">${esc(hero.primary_button?.text || "Docs")}</a></p>
    ${features}
    <footer><p>${esc(site.homepage.footer.copyright)}</p></footer>`;
  markActive(null);
}

async function renderDocList() {
  const data = await api("/api/docs");
  tocPanel.innerHTML = "";
  main.innerHTML = `<h1>All documents</h1>` +
    data.documents.map((doc) => docCard(doc, null)).join("");
  markActive(null);
}

function renderToc(toc) {
  if (!toc.length) {
    tocPanel.innerHTML = "";
    return;
  }
  tocPanel.innerHTML = `<h3>On this page</h3>` + toc.map((entry) =>
    `<a href="#${esc(entry.id)}" data-id="${esc(entry.id)}" style="padding-left:${(entry.level - 1) * 12}px">${esc(entry.text)}</a>`
  ).join("");
  tocPanel.querySelectorAll("a").forEach((link) => {
    link.addEventListener("click", (event) => {
      event.preventDefault();
      const target = document.getElementById(link.dataset.id);
      if (target) target.scrollIntoView({ behavior: "smooth" });
    });
  });

  if (app.observer) app.observer.disconnect();
  app.observer = new IntersectionObserver((entries) => {
    const visible = entries.filter((entry) => entry.isIntersecting);
    if (!visible.length) return;
    const top = visible.reduce((closest, entry) =>
      entry.boundingClientRect.top < closest.boundingClientRect.top ? entry : closest);
    tocPanel.querySelectorAll("a").forEach((link) => {
      link.classList.toggle("active", link.dataset.id === top.target.id);
    });
  }, { rootMargin: "-80px 0% -70% 0%" });
  document.querySelectorAll("article h1, article h2, article h3, article h4")
    .forEach((heading) => app.observer.observe(heading));
}

function renderGiscus(container) {
  const giscus = app.site.giscus;
  if (!giscus) return;
  const script = document.createElement("script");
  script.src = "https://giscus.app/client.js";
  script.async = true;
  script.crossOrigin = "anonymous";
  script.setAttribute("data-repo", giscus.repo);
  script.setAttribute("data-repo-id", giscus.repoId);
  script.setAttribute("data-category", giscus.category);
  script.setAttribute("data-category-id", giscus.categoryId);
  script.setAttribute("data-mapping", giscus.mapping);
  script.setAttribute("data-strict", giscus.strict);
  script.setAttribute("data-reactions-enabled", giscus.reactionsEnabled);
  script.setAttribute("data-emit-metadata", giscus.emitMetadata);
  script.setAttribute("data-input-position", giscus.inputPosition);
  script.setAttribute("data-theme", giscus.theme);
  script.setAttribute("data-lang", giscus.lang);
  container.appendChild(script);
}

function renderAssistant(container, slug) {
  if (!app.site.assistant_enabled) return;
  const panel = document.createElement("div");
  panel.className = "assistant";
  panel.innerHTML = `<h3>Ask about this page</h3>
    <textarea placeholder="Ask a question about this document..."></textarea>
    <button>Ask</button>
    <div class="answer"></div>`;
  const textarea = panel.querySelector("textarea");
  const answer = panel.querySelector(".answer");
  panel.querySelector("button").addEventListener("click", async () => {
    const question = textarea.value.trim();
    if (!question) return;
    answer.textContent = "Thinking...";
    try {
      const res = await fetch("/api/assistant/ask", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ slug, question, history: [] }),
      });
      const body = await res.json();
      answer.textContent = res.ok ? body.answer : (body.message || "Request failed");
    } catch (err) {
      answer.textContent = "Request failed";
    }
  });
  container.appendChild(panel);
}

async function renderDoc(slug) {
  let doc;
  try {
    doc = await api(`/api/docs/${encodeURIComponent(slug)}`);
  } catch (err) {
    tocPanel.innerHTML = "";
    main.innerHTML = `<div class="notice"><p>Document not found: ${esc(slug)}</p></div>`;
    return;
  }

  const tags = (doc.meta.tags || []).map((tag) =>
    `<a class="tag-badge" href="#/tags/${encodeURIComponent(tag)}">${esc(tag)}</a>`).join("");
  const nav = `<div class="doc-nav">
    <span>${doc.previous ? `<a href="#/docs/${encodeURIComponent(doc.previous.slug)}">&larr; ${esc(doc.previous.title)}</a>` : ""}</span>
    <span>${doc.next ? `<a href="#/docs/${encodeURIComponent(doc.next.slug)}">${esc(doc.next.title)} &rarr;</a>` : ""}</span>
  </div>`;

  main.innerHTML = `<article>${doc.html}</article><div>${tags}</div>${nav}
    <div id="extras"></div>`;

  const article = main.querySelector("article");
  if (window.hljs) {
    article.querySelectorAll("pre code").forEach((block) => window.hljs.highlightElement(block));
  }
  if (window.renderMathInElement) {
    window.renderMathInElement(article, {
      delimiters: [
        { left: "$$", right: "$$", display: true },
        { left: "$", right: "$", display: false },
      ],
      throwOnError: false,
    });
  }

  renderToc(doc.toc);
  const extras = document.getElementById("extras");
  renderAssistant(extras, slug);
  renderGiscus(extras);
  markActive(slug);
}

async function renderTag(tag) {
  const data = await api(`/api/tags/${encodeURIComponent(tag)}`);
  tocPanel.innerHTML = "";
  let body = `<h1>Tag: ${esc(data.tag)}</h1>`;
  if (data.documents.length) {
    body += data.documents.map((doc) => docCard(doc, data.tag)).join("");
  } else {
    body += `<div class="notice"><p>No documents found for tag "${esc(data.tag)}".</p></div>`;
    if (data.suggestions.length) {
      body += `<p>You might be looking for:</p><div>` + data.suggestions.map((suggestion) =>
        `<a class="tag-badge" href="#/tags/${encodeURIComponent(suggestion)}">${esc(suggestion)}</a>`
      ).join("") + `</div>`;
    }
  }
  main.innerHTML = body;
  markActive(null);
}

async function renderTags() {
  const data = await api("/api/tags");
  tocPanel.innerHTML = "";
  main.innerHTML = `<h1>Tags</h1><div>` + data.tags.map((entry) =>
    `<a class="tag-badge" href="#/tags/${encodeURIComponent(entry.tag)}">${esc(entry.tag)} (${entry.count})</a>`
  ).join("") + `</div>`;
  markActive(null);
}

async function renderSearch(query) {
  const data = await api(`/api/search?q=${encodeURIComponent(query)}`);
  tocPanel.innerHTML = "";
  main.innerHTML = `<h1>Search: ${esc(query)}</h1>` + (data.results.length
    ? data.results.map((hit) => `<div class="doc-card">
        <h3><a href="#/docs/${encodeURIComponent(hit.slug)}">${esc(hit.title)}</a></h3>
        <p>${esc(hit.snippet || hit.excerpt)}</p>
      </div>`).join("")
    : `<div class="notice"><p>No results.</p></div>`);
  markActive(null);
}

async function route() {
  const hash = decodeURIComponent(location.hash || "#/");
  if (hash.startsWith("#/docs/")) return renderDoc(hash.slice("#/docs/".length));
  if (hash === "#/docs") return renderDocList();
  if (hash.startsWith("#/tags/")) return renderTag(hash.slice("#/tags/".length));
  if (hash === "#/tags") return renderTags();
  if (hash.startsWith("#/search/")) return renderSearch(hash.slice("#/search/".length));
  return renderHome();
}

document.getElementById("search-form").addEventListener("submit", (event) => {
  event.preventDefault();
  const query = document.getElementById("search-input").value.trim();
  if (query) location.hash = `#/search/${encodeURIComponent(query)}`;
});

async function boot() {
  app.site = await api("/api/site");
  document.getElementById("site-title").textContent = app.site.title;
  document.title = app.site.title;

  const toggle = document.createElement("button");
  toggle.className = "toc-toggle";
  toggle.textContent = "TOC";
  toggle.addEventListener("click", () => app.tocState.set(!app.tocState.visible));
  document.body.appendChild(toggle);

  await renderSidebar();
  window.addEventListener("hashchange", route);
  await route();
}

boot();
"##;
