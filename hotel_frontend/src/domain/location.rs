// Fixed destination tables. The backend only understands the 3-letter codes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub name: &'static str,
    pub country: &'static str,
    pub code: &'static str,
}

// Gallery entry shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub title: &'static str,
    pub country: &'static str,
    pub code: &'static str,
    pub image: &'static str,
    pub alt: &'static str,
}

pub static LOCATIONS: [Location; 14] = [
    Location { name: "New York", country: "United States", code: "NYC" },
    Location { name: "London", country: "United Kingdom", code: "LON" },
    Location { name: "Paris", country: "France", code: "PAR" },
    Location { name: "Tokyo", country: "Japan", code: "TYO" },
    Location { name: "Rome", country: "Italy", code: "ROM" },
    Location { name: "Sydney", country: "Australia", code: "SYD" },
    Location { name: "Barcelona", country: "Spain", code: "BCN" },
    Location { name: "Dubai", country: "United Arab Emirates", code: "DXB" },
    Location { name: "Amsterdam", country: "Netherlands", code: "AMS" },
    Location { name: "Dhaka", country: "Bangladesh", code: "DAC" },
    Location { name: "Istanbul", country: "Turkey", code: "IST" },
    Location { name: "Kathmandu", country: "Nepal", code: "KTM" },
    Location { name: "Lahore", country: "Pakistan", code: "LHE" },
    Location { name: "Beijing", country: "China", code: "PEK" },
];

pub static DESTINATIONS: [Destination; 14] = [
    Destination {
        title: "Dhaka",
        country: "Bangladesh",
        code: "DAC",
        image: "https://images.unsplash.com/photo-1706640254398-3b04782e8c76?q=80&w=1974&auto=format&fit=crop",
        alt: "Cityscape of Dhaka with modern buildings and traditional architecture",
    },
    Destination {
        title: "Istanbul",
        country: "Turkey",
        code: "IST",
        image: "https://images.unsplash.com/photo-1524231757912-21f4fe3a7200?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "Istanbul skyline with the Blue Mosque and Bosphorus",
    },
    Destination {
        title: "Kathmandu",
        country: "Nepal",
        code: "KTM",
        image: "https://images.unsplash.com/photo-1544085311-11a028465b03?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "Ancient temples and stupas in Kathmandu",
    },
    Destination {
        title: "Lahore",
        country: "Pakistan",
        code: "LHE",
        image: "https://images.unsplash.com/photo-1622546758596-f1f06ba11f58?q=80&w=2121&auto=format&fit=crop",
        alt: "Historical architecture of Lahore with ornate designs",
    },
    Destination {
        title: "Beijing",
        country: "China",
        code: "PEK",
        image: "https://images.unsplash.com/photo-1508804185872-d7badad00f7d?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "Great Wall of China near Beijing",
    },
    Destination {
        title: "New York",
        country: "United States",
        code: "NYC",
        image: "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "New York City skyline with Empire State Building",
    },
    Destination {
        title: "London",
        country: "United Kingdom",
        code: "LON",
        image: "https://images.unsplash.com/photo-1513635269975-59663e0ac1ad?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "London cityscape with Big Ben and the Thames",
    },
    Destination {
        title: "Paris",
        country: "France",
        code: "PAR",
        image: "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "Paris with Eiffel Tower",
    },
    Destination {
        title: "Tokyo",
        country: "Japan",
        code: "TYO",
        image: "https://images.unsplash.com/photo-1503899036084-c55cdd92da26?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "Tokyo skyline with Mount Fuji in the background",
    },
    Destination {
        title: "Rome",
        country: "Italy",
        code: "ROM",
        image: "https://images.unsplash.com/photo-1529260830199-42c24126f198?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "Rome with the Colosseum",
    },
    Destination {
        title: "Sydney",
        country: "Australia",
        code: "SYD",
        image: "https://images.unsplash.com/photo-1506973035872-a4ec16b8e8d9?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "Sydney Opera House and harbor",
    },
    Destination {
        title: "Barcelona",
        country: "Spain",
        code: "BCN",
        image: "https://images.unsplash.com/photo-1583422409516-2895a77efded?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "Aerial view of Barcelona with Sagrada Familia",
    },
    Destination {
        title: "Dubai",
        country: "United Arab Emirates",
        code: "DXB",
        image: "https://images.unsplash.com/photo-1512453979798-5ea266f8880c?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "Dubai skyline with Burj Khalifa",
    },
    Destination {
        title: "Amsterdam",
        country: "Netherlands",
        code: "AMS",
        image: "https://images.unsplash.com/photo-1534351590666-13e3e96b5017?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        alt: "Amsterdam canals with traditional houses",
    },
];

/// Resolves free text to a location code.
///
/// Accepts a location name (case-insensitive, surrounding whitespace ignored) or one of the
/// known codes. Anything else is unresolved so no search is issued for it.
pub fn code_for(text: &str) -> Option<&'static str> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    LOCATIONS
        .iter()
        .find(|loc| loc.name.eq_ignore_ascii_case(text) || loc.code.eq_ignore_ascii_case(text))
        .map(|loc| loc.code)
}

pub fn name_for_code(code: &str) -> Option<&'static str> {
    LOCATIONS
        .iter()
        .find(|loc| loc.code.eq_ignore_ascii_case(code))
        .map(|loc| loc.name)
}

/// Case-insensitive substring test against a label or its country.
///
/// `needle` must already be lowercased.
pub fn label_or_country_contains(label: &str, country: &str, needle: &str) -> bool {
    label.to_lowercase().contains(needle) || country.to_lowercase().contains(needle)
}

// Matching locations in table order.
pub fn matching(query: &str) -> Vec<&'static Location> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    LOCATIONS
        .iter()
        .filter(|loc| label_or_country_contains(loc.name, loc.country, &needle))
        .collect()
}
