//! Extraction commands.

use tokio::runtime::Runtime;

use liner_notes::document::{Document, Language};
use liner_notes::sites::wikipedia::{self, album_list};
use liner_notes::sites::{Google, Wikipedia};
use liner_notes::source::{DocumentSource, PageFetcher, Request, Site};

use super::output;

/// Extract an artist's biography
pub fn cmd_artist<F: PageFetcher>(
    rt: &Runtime,
    source: &DocumentSource<F>,
    target: &str,
    language: &Language,
    translate: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let request = Request::parse(target, Some(language.clone()));
    let artist = rt.block_on(async {
        let doc = load_translated(source, &Wikipedia, &request, translate).await?;
        Ok::<_, anyhow::Error>(wikipedia::artist::extract(&doc))
    })?;

    output::emit(&artist, json, output::print_artist)
}

/// Extract an album from Wikipedia, or from Google search results
pub fn cmd_album<F: PageFetcher>(
    rt: &Runtime,
    source: &DocumentSource<F>,
    target: &str,
    language: &Language,
    google: bool,
    translate: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let request = Request::parse(target, Some(language.clone()));
    let use_google = match &request {
        Request::Url(url) => Google::ALBUM.matches_url(url),
        Request::Query { .. } => google,
    };

    let album = rt.block_on(async {
        if use_google {
            let doc = source.load(&Google::ALBUM, &request).await?;
            return Ok::<_, anyhow::Error>(liner_notes::sites::google::album::extract(&doc));
        }

        let doc = load_translated(source, &Wikipedia, &request, translate).await?;
        Ok(wikipedia::album::extract(&doc))
    })?;

    output::emit(&album, json, output::print_album)
}

/// Extract an artist's album list, optionally merged with the linked
/// discography article
pub fn cmd_albums<F: PageFetcher>(
    rt: &Runtime,
    source: &DocumentSource<F>,
    target: &str,
    language: &Language,
    discography: bool,
    translate: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let request = Request::parse(target, Some(language.clone()));
    let list = rt.block_on(async {
        let doc = load_translated(source, &Wikipedia, &request, translate).await?;
        if album_list::is_discography_url(doc.url(), doc.language()) {
            return Ok::<_, anyhow::Error>(album_list::extract_discography(&doc));
        }

        let mut list = album_list::extract(&doc);
        let discography_url = list.discography_url.clone();
        drop(doc);

        if discography
            && let Some(url) = discography_url
        {
            let doc = source.load(&Wikipedia, &Request::Url(url)).await?;
            list.merge(album_list::extract_discography(&doc));
        }
        Ok(list)
    })?;

    output::emit(&list, json, output::print_album_list)
}

/// Extract lyrics from Google search results
pub fn cmd_lyrics<F: PageFetcher>(
    rt: &Runtime,
    source: &DocumentSource<F>,
    target: &str,
    language: &Language,
    json: bool,
) -> anyhow::Result<()> {
    let request = Request::parse(target, Some(language.clone()));
    let lyrics = rt.block_on(async {
        let doc = source.load(&Google::LYRICS, &request).await?;
        Ok::<_, anyhow::Error>(liner_notes::sites::google::lyrics::extract(&doc))
    })?;

    output::emit(&lyrics, json, output::print_lyrics)
}

/// Load a Wikipedia page, then follow its interlanguage link when another
/// edition is asked for. Falls back to the page itself when the article
/// has no such link or is a discography section.
async fn load_translated<F: PageFetcher>(
    source: &DocumentSource<F>,
    site: &dyn Site,
    request: &Request,
    translate: Option<&str>,
) -> anyhow::Result<Document> {
    let doc = source.load(site, request).await?;
    let Some(target) = translate.map(Language::new) else {
        return Ok(doc);
    };

    if doc.fragment().is_some() {
        tracing::warn!(url = doc.url(), "Discography sections cannot be translated");
        return Ok(doc);
    }

    let Some(url) = wikipedia::language_link(&doc, &target) else {
        if doc.language() != &target {
            tracing::warn!(lang = %target, url = doc.url(), "No article in the requested language");
        }
        return Ok(doc);
    };

    tracing::info!(lang = %target, %url, "Following interlanguage link");
    drop(doc);
    Ok(source.load(site, &Request::Url(url)).await?)
}
