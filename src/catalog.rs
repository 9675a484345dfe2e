use crate::model::Movie;

/// Movie offered by the booking form. Not derived from the catalog entry
/// the user viewed; bookings always carry this fixed title.
pub const BOOKING_MOVIE: &str = "Example Movie";

pub fn now_showing() -> Vec<Movie> {
    vec![
        Movie {
            title: "The Grand Premiere",
            genre: "Drama",
            poster: "posters/movie1.jpeg",
            duration: "2h 10m",
            rating: "4.5",
            synopsis: "A heartfelt journey of dreams and destiny.",
        },
        Movie {
            title: "Engaging",
            genre: "Drama",
            poster: "posters/movie2.jpg",
            duration: "1h 45m",
            rating: "4.2",
            synopsis: "A hilarious ride through everyday chaos.",
        },
    ]
}

pub fn coming_soon() -> Vec<Movie> {
    vec![Movie {
        title: "Future Flick",
        genre: "Sci-Fi",
        poster: "posters/upcoming1.jpg",
        duration: "2h 20m",
        rating: "N/A",
        synopsis: "A mind-bending tale of time and technology.",
    }]
}

pub fn top_rated() -> Vec<Movie> {
    vec![Movie {
        title: "Edge of Tomorrow",
        genre: "Action",
        poster: "posters/movie3.jpeg",
        duration: "2h",
        rating: "4.8",
        synopsis: "A soldier relives the same day in a war against aliens.",
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_are_fixed() {
        assert_eq!(now_showing().len(), 2);
        assert_eq!(coming_soon().len(), 1);
        assert_eq!(top_rated().len(), 1);
        assert_eq!(now_showing()[0].title, "The Grand Premiere");
        assert_eq!(top_rated()[0].genre, "Action");
    }
}
