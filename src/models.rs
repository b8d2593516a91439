use serde::{Deserialize, Serialize};

/// Catalog identifier of a movie. Unique per catalog entry.
pub type MovieId = u64;

// ---------------------------------------------------------------------------
// Popular list response wrapper
// ---------------------------------------------------------------------------

/// Body of the popular-movies endpoint.  Paging fields sent alongside
/// `results` are ignored: only the first page is ever requested.
#[derive(Debug, Clone, Deserialize)]
pub struct PopularPage {
    pub results: Vec<MovieRecord>,
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

/// A movie as returned by the catalog and as stored in the favorites list.
///
/// Wire keys equal the field names.  Dates and language codes are carried
/// through unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub poster_path: String,
    pub overview: String,
    pub release_date: String,
    pub vote_average: f64,
    pub original_language: String,
}

impl MovieRecord {
    /// Absolute poster URL, `image_base` immediately followed by the poster path.
    pub fn poster_url(&self, image_base: &str) -> String {
        format!("{}{}", image_base.trim_end_matches('/'), self.poster_path)
    }

    /// Leading year of the release date, if the date starts with four digits.
    pub fn release_year(&self) -> Option<&str> {
        let year = self.release_date.get(..4)?;
        year.chars().all(|c| c.is_ascii_digit()).then_some(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(poster_path: &str, release_date: &str) -> MovieRecord {
        MovieRecord {
            id: 550,
            title: "Fight Club".into(),
            poster_path: poster_path.into(),
            overview: String::new(),
            release_date: release_date.into(),
            vote_average: 8.4,
            original_language: "en".into(),
        }
    }

    #[test]
    fn poster_url_joins_base_and_path() {
        let m = movie("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg", "1999-10-15");
        assert_eq!(
            m.poster_url("https://image.tmdb.org/t/p/w500"),
            "https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
        );
        assert_eq!(
            m.poster_url("https://image.tmdb.org/t/p/w500/"),
            "https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
        );
    }

    #[test]
    fn release_year_requires_four_digits() {
        assert_eq!(movie("", "1999-10-15").release_year(), Some("1999"));
        assert_eq!(movie("", "").release_year(), None);
        assert_eq!(movie("", "soon").release_year(), None);
    }
}
