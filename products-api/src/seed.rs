//! Sample products indexed when the product index is first created.

use products_shared::NewProduct;

/// The sample catalog: fifteen products over five categories.
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct::new("MacBook Pro 14", 2499.99, "electronics")
            .with_description("Apple MacBook Pro 14 pouces avec puce M3 Pro, 18 Go RAM, 512 Go SSD")
            .with_stock(25),
        NewProduct::new("iPhone 15 Pro", 1229.00, "electronics")
            .with_description("Apple iPhone 15 Pro 256 Go, titane naturel")
            .with_stock(50),
        NewProduct::new("Sony WH-1000XM5", 349.99, "electronics")
            .with_description("Casque Bluetooth à réduction de bruit active, 30h d'autonomie")
            .with_stock(100),
        NewProduct::new("Samsung Galaxy Tab S9", 899.00, "electronics")
            .with_description("Tablette Android 11 pouces AMOLED, 128 Go, Wi-Fi")
            .with_stock(35),
        NewProduct::new("Nike Air Max 90", 139.99, "clothing")
            .with_description("Chaussures de sport classiques, blanc/noir")
            .with_stock(200),
        NewProduct::new("Levi's 501 Original", 99.00, "clothing")
            .with_description("Jean homme coupe droite, bleu délavé")
            .with_stock(150),
        NewProduct::new("The North Face Nuptse", 320.00, "clothing")
            .with_description("Doudoune homme noir, isolation 700")
            .with_stock(45),
        NewProduct::new("Clean Code", 35.99, "books")
            .with_description("Robert C. Martin - Guide pratique du développement logiciel")
            .with_stock(500),
        NewProduct::new("Design Patterns", 49.99, "books")
            .with_description("Gang of Four - Catalogue des patrons de conception")
            .with_stock(300),
        NewProduct::new("Dyson V15 Detect", 699.00, "home")
            .with_description("Aspirateur balai sans fil avec laser, autonomie 60 min")
            .with_stock(60),
        NewProduct::new("Nespresso Vertuo Plus", 149.99, "home")
            .with_description("Machine à café automatique, 5 tailles de tasses")
            .with_stock(80),
        NewProduct::new("Philips Hue Starter Kit", 139.99, "home")
            .with_description("Kit de démarrage 3 ampoules connectées + pont")
            .with_stock(120),
        NewProduct::new("Adidas Ballon UEFA Champions League", 149.00, "sports")
            .with_description("Ballon officiel de match, taille 5")
            .with_stock(75),
        NewProduct::new("Garmin Forerunner 265", 449.99, "sports")
            .with_description("Montre GPS running avec écran AMOLED")
            .with_stock(40),
        NewProduct::new("Theragun Prime", 299.00, "sports")
            .with_description("Pistolet de massage percussion, 5 vitesses")
            .with_stock(55),
    ]
}
