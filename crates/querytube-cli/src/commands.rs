//! Subcommand implementations.
//!
//! Each takes its input and output streams explicitly so tests can drive
//! them without a terminal.

use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use querytube_core::constants::EXAMPLE_QUERIES;
use querytube_core::models::{SearchPhase, SearchResponse};
use querytube_core::{IEmbeddingProvider, QueryTubeConfig};
use querytube_corpus::{embed_records, read_records, write_embeddings};
use querytube_embeddings::create_provider;
use querytube_observability::tracing_setup::events;
use querytube_retrieval::SearchService;

use crate::render;

/// Run `query` and time it, forwarding progress to `on_progress`.
fn respond_timed<F>(service: &SearchService, query: &str, k: usize, on_progress: F) -> SearchResponse
where
    F: FnMut(SearchPhase),
{
    let started = Instant::now();
    let response = service.respond(query, k, on_progress);
    events::request_completed(
        &format!("{:?}", response.status),
        response.hits.len(),
        started.elapsed().as_millis(),
    );
    response
}

/// `querytube search`.
pub fn search<W: Write>(
    service: &SearchService,
    query: &str,
    k: Option<usize>,
    json: bool,
    out: &mut W,
) -> anyhow::Result<SearchResponse> {
    let k = k.unwrap_or(service.config().default_top_k);
    let response = respond_timed(service, query, k, |_| {});
    if json {
        writeln!(out, "{}", render::render_json(&response)?)?;
    } else {
        write!(out, "{}", render::render_text(&response))?;
    }
    Ok(response)
}

/// `querytube repl`: one query per input line until EOF.
///
/// Failed queries are reported and the loop continues.
pub fn repl<R: BufRead, W: Write>(
    service: &SearchService,
    k: Option<usize>,
    input: R,
    out: &mut W,
) -> anyhow::Result<usize> {
    let k = k.unwrap_or(service.config().default_top_k);
    writeln!(
        out,
        "QueryTube: semantic search over {} videos. Try one of:",
        service.corpus().len()
    )?;
    for example in EXAMPLE_QUERIES {
        writeln!(out, "  - {example}")?;
    }
    out.flush()?;

    let mut handled = 0;
    for line in input.lines() {
        let query = line.context("reading query from stdin")?;
        let mut announced = Ok(());
        let response = respond_timed(service, &query, k, |phase| {
            if phase == SearchPhase::Searching {
                announced = writeln!(out, "{}", render::STATUS_SEARCHING).and_then(|_| out.flush());
            }
        });
        announced?;
        write!(out, "{}", render::render_text(&response))?;
        out.flush()?;
        handled += 1;
    }
    Ok(handled)
}

/// `querytube prepare`: embed every record and write the matrix.
pub fn prepare<W: Write>(
    config: &QueryTubeConfig,
    output: Option<&Path>,
    out: &mut W,
) -> anyhow::Result<(usize, usize)> {
    let records_path = Path::new(&config.corpus.records_path);
    let output = output.unwrap_or_else(|| Path::new(&config.corpus.embeddings_path));

    let records = read_records(records_path).context("reading records")?;
    let provider = create_provider(&config.embedding)
        .with_context(|| format!("initializing `{}` provider", config.embedding.provider))?;
    let matrix = embed_records(&records, provider.as_ref(), config.embedding.batch_size)
        .context("embedding records")?;
    write_embeddings(output, &matrix)
        .with_context(|| format!("writing {}", output.display()))?;

    let (rows, dims) = matrix.dim();
    events::embeddings_prepared(rows, dims, &output.display().to_string());
    writeln!(
        out,
        "Wrote {rows} x {dims} embeddings ({}) to {}",
        provider.name(),
        output.display()
    )?;
    Ok((rows, dims))
}

/// `querytube inspect`.
pub fn inspect<W: Write>(service: &SearchService, out: &mut W) -> anyhow::Result<()> {
    let corpus = service.corpus();
    let encoder = service.encoder();
    writeln!(out, "records:        {}", corpus.len())?;
    writeln!(out, "dimensions:     {}", corpus.dimensions())?;
    writeln!(out, "fingerprint:    {}", corpus.fingerprint())?;
    writeln!(out, "provider:       {}", encoder.provider_name())?;
    writeln!(out, "query cache:    {}", encoder.cache().capacity())?;
    writeln!(out, "default top-k:  {}", service.config().default_top_k)?;
    writeln!(
        out,
        "zero vectors:   {:?}",
        service.config().zero_vector_policy
    )?;
    Ok(())
}
