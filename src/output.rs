use std::io::{self, Write};

use serde::Serialize;

use crate::app::{ArtistDetail, CatalogListing};
use crate::present::{LocationGroup, format_date, members_label};

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Text,
    Json,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_listing(listing: &CatalogListing) -> io::Result<()> {
        Self::print_json(listing)
    }

    pub fn print_detail(detail: &ArtistDetail) -> io::Result<()> {
        Self::print_json(detail)
    }

    pub fn print_groups(groups: &[LocationGroup]) -> io::Result<()> {
        Self::print_json(&groups)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

pub struct TextOutput;

impl TextOutput {
    pub fn print_listing(listing: &CatalogListing) -> io::Result<()> {
        let mut out = io::stdout().lock();
        Self::write_listing(&mut out, listing)
    }

    pub fn print_detail(detail: &ArtistDetail) -> io::Result<()> {
        let mut out = io::stdout().lock();
        Self::write_detail(&mut out, detail)
    }

    pub fn print_groups(groups: &[LocationGroup]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        Self::write_groups(&mut out, groups)
    }

    pub fn write_listing<W: Write>(out: &mut W, listing: &CatalogListing) -> io::Result<()> {
        if listing.query.is_empty() {
            writeln!(out, "{} artists", listing.total)?;
        } else {
            writeln!(
                out,
                "{} of {} artists match \"{}\"",
                listing.count, listing.total, listing.query
            )?;
        }
        for artist in &listing.artists {
            writeln!(
                out,
                "{:>4}  {} ({})  {}",
                artist.id,
                artist.name,
                artist.creation_date,
                members_label(&artist.members)
            )?;
        }
        Ok(())
    }

    pub fn write_detail<W: Write>(out: &mut W, detail: &ArtistDetail) -> io::Result<()> {
        let artist = &detail.artist;
        writeln!(out, "{} (#{})", artist.name, artist.id)?;
        writeln!(out, "  members:     {}", members_label(&artist.members))?;
        writeln!(out, "  formed:      {}", artist.creation_date)?;
        writeln!(out, "  first album: {}", format_date(&artist.first_album))?;
        writeln!(out, "  concerts:    {}", artist.concert_dates.len())?;
        Self::write_groups(out, &detail.location_groups)
    }

    pub fn write_groups<W: Write>(out: &mut W, groups: &[LocationGroup]) -> io::Result<()> {
        for group in groups {
            let dates = group
                .dates
                .iter()
                .map(|date| format_date(date))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out, "  {} [{}]: {}", group.label, group.count, dates)?;
        }
        Ok(())
    }
}
